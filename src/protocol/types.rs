//! Message flags

use std::fmt;

/// Message flags
///
/// The three values are mutually exclusive: a request expecting a reply, a
/// request expecting none, or a reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum MessageFlags {
    /// No reply expected
    #[default]
    None = 0,
    /// Sender waits for a reply carrying the same request id
    ExpectsResponse = 1 << 0,
    /// This message is a reply
    IsResponse = 1 << 1,
}

impl MessageFlags {
    /// Convert from the raw flags word
    #[must_use]
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::ExpectsResponse),
            2 => Some(Self::IsResponse),
            _ => None,
        }
    }

    /// Convert to the raw flags word
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Check whether a request id travels with these flags
    #[must_use]
    pub const fn has_request_id(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Check if the sender waits for a reply
    #[must_use]
    pub const fn expects_response(self) -> bool {
        matches!(self, Self::ExpectsResponse)
    }

    /// Check if this is a reply
    #[must_use]
    pub const fn is_response(self) -> bool {
        matches!(self, Self::IsResponse)
    }
}

impl fmt::Display for MessageFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::ExpectsResponse => "EXPECTS_RESPONSE",
            Self::IsResponse => "IS_RESPONSE",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_raw_values() {
        for flags in [
            MessageFlags::None,
            MessageFlags::ExpectsResponse,
            MessageFlags::IsResponse,
        ] {
            assert_eq!(MessageFlags::from_u32(flags.as_u32()), Some(flags));
        }
        // Both bits at once is contradictory.
        assert_eq!(MessageFlags::from_u32(3), None);
        assert_eq!(MessageFlags::from_u32(4), None);
    }

    #[test]
    fn test_flags_predicates() {
        assert!(!MessageFlags::None.has_request_id());
        assert!(MessageFlags::ExpectsResponse.has_request_id());
        assert!(MessageFlags::ExpectsResponse.expects_response());
        assert!(MessageFlags::IsResponse.is_response());
        assert!(!MessageFlags::IsResponse.expects_response());
        assert_eq!(MessageFlags::IsResponse.to_string(), "IS_RESPONSE");
    }
}
