use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==================== Quadrant ====================

/// One of the four fixed cells of the matrix
///
/// Every task belongs to exactly one quadrant. The display name and the
/// wire key are both derived by exhaustive match, so there is no way to
/// hold a quadrant the server would not accept.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Quadrant {
    /// Do first
    #[default]
    #[serde(rename = "urgent_important")]
    UrgentImportant,
    /// Schedule
    #[serde(rename = "not_urgent_important")]
    NotUrgentImportant,
    /// Delegate
    #[serde(rename = "urgent_not_important")]
    UrgentNotImportant,
    /// Drop
    #[serde(rename = "not_urgent_not_important")]
    NotUrgentNotImportant,
}

impl Quadrant {
    /// All quadrants in display order
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UrgentImportant,
        Quadrant::NotUrgentImportant,
        Quadrant::UrgentNotImportant,
        Quadrant::NotUrgentNotImportant,
    ];

    /// Storage key used on the wire
    pub fn wire_key(self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "urgent_important",
            Quadrant::NotUrgentImportant => "not_urgent_important",
            Quadrant::UrgentNotImportant => "urgent_not_important",
            Quadrant::NotUrgentNotImportant => "not_urgent_not_important",
        }
    }

    /// Human-readable name shown as the quadrant heading
    pub fn display_name(self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "Urgent / Important",
            Quadrant::NotUrgentImportant => "Not Urgent / Important",
            Quadrant::UrgentNotImportant => "Urgent / Not Important",
            Quadrant::NotUrgentNotImportant => "Not Urgent / Not Important",
        }
    }

    /// Classic Eisenhower action word for the quadrant
    pub fn action(self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "do",
            Quadrant::NotUrgentImportant => "schedule",
            Quadrant::UrgentNotImportant => "delegate",
            Quadrant::NotUrgentNotImportant => "delete",
        }
    }

    /// Zero-based position in display order
    pub fn index(self) -> usize {
        match self {
            Quadrant::UrgentImportant => 0,
            Quadrant::NotUrgentImportant => 1,
            Quadrant::UrgentNotImportant => 2,
            Quadrant::NotUrgentNotImportant => 3,
        }
    }

    /// Quadrant at a zero-based display position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Next quadrant in display order, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous quadrant in display order, wrapping around
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Parse a wire key exactly as the server stores it
    pub fn from_wire_key(key: &str) -> Option<Self> {
        match key {
            "urgent_important" => Some(Quadrant::UrgentImportant),
            "not_urgent_important" => Some(Quadrant::NotUrgentImportant),
            "urgent_not_important" => Some(Quadrant::UrgentNotImportant),
            "not_urgent_not_important" => Some(Quadrant::NotUrgentNotImportant),
            _ => None,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when text does not name a quadrant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown quadrant '{0}' (expected a wire key, a display name, do/schedule/delegate/delete or 1-4)")]
pub struct QuadrantParseError(pub String);

impl FromStr for Quadrant {
    type Err = QuadrantParseError;

    /// Accepts the wire key, the display name (any case), the action word
    /// or a one-based position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(q) = Self::from_wire_key(trimmed) {
            return Ok(q);
        }

        let lowered = trimmed.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|q| {
                q.display_name().to_lowercase() == lowered
                    || q.action() == lowered
                    || (q.index() + 1).to_string() == lowered
            })
            .ok_or_else(|| QuadrantParseError(trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_keys() {
        assert_eq!(Quadrant::UrgentImportant.wire_key(), "urgent_important");
        assert_eq!(Quadrant::NotUrgentImportant.wire_key(), "not_urgent_important");
        assert_eq!(Quadrant::UrgentNotImportant.wire_key(), "urgent_not_important");
        assert_eq!(
            Quadrant::NotUrgentNotImportant.wire_key(),
            "not_urgent_not_important"
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Quadrant::UrgentImportant.to_string(), "Urgent / Important");
        assert_eq!(
            Quadrant::NotUrgentNotImportant.to_string(),
            "Not Urgent / Not Important"
        );
    }

    #[test]
    fn test_serde_matches_wire_key() {
        for q in Quadrant::ALL {
            let json = serde_json::to_string(&q).unwrap();
            assert_eq!(json, format!("\"{}\"", q.wire_key()));
            let back: Quadrant = serde_json::from_str(&json).unwrap();
            assert_eq!(back, q);
        }
    }

    #[test]
    fn test_unknown_wire_key_rejected() {
        let result: Result<Quadrant, _> = serde_json::from_str("\"someday\"");
        assert!(result.is_err());
        assert_eq!(Quadrant::from_wire_key("Urgent / Important"), None);
    }

    #[test]
    fn test_index_round_trip() {
        for (i, q) in Quadrant::ALL.into_iter().enumerate() {
            assert_eq!(q.index(), i);
            assert_eq!(Quadrant::from_index(i), Some(q));
        }
        assert_eq!(Quadrant::from_index(4), None);
    }

    #[test]
    fn test_next_prev_wrap() {
        assert_eq!(Quadrant::NotUrgentNotImportant.next(), Quadrant::UrgentImportant);
        assert_eq!(Quadrant::UrgentImportant.prev(), Quadrant::NotUrgentNotImportant);
        assert_eq!(Quadrant::UrgentImportant.next().prev(), Quadrant::UrgentImportant);
    }

    #[test]
    fn test_parse_accepts_all_spellings() {
        assert_eq!("urgent_important".parse(), Ok(Quadrant::UrgentImportant));
        assert_eq!("not urgent / important".parse(), Ok(Quadrant::NotUrgentImportant));
        assert_eq!("delegate".parse(), Ok(Quadrant::UrgentNotImportant));
        assert_eq!(" 4 ".parse(), Ok(Quadrant::NotUrgentNotImportant));
        assert_eq!("DO".parse(), Ok(Quadrant::UrgentImportant));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "5".parse::<Quadrant>().unwrap_err();
        assert_eq!(err, QuadrantParseError("5".into()));
        assert!(err.to_string().contains("unknown quadrant '5'"));
    }

    #[test]
    fn test_default_is_do_first() {
        assert_eq!(Quadrant::default(), Quadrant::UrgentImportant);
    }
}
