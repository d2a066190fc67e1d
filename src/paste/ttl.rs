//! TTL Registry
//!
//! The fixed set of time-to-live options a paste can be stored with. Labels
//! are the public vocabulary ("1h", "7d", ...); each maps to a whole number
//! of hours. The registry is the single source of truth for valid TTL values
//! at both save time and load time: a label that does not resolve here is
//! rejected on save, and a stored file carrying one is treated as corrupt.

use std::fmt;
use std::time::{Duration, SystemTime};

/// A supported time-to-live for a stored paste.
///
/// The set is fixed at build time and not extensible at runtime. The label
/// (see [`Ttl::label`]) is embedded in the paste's filename, so changing or
/// removing a variant orphans records already on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ttl {
    /// `1h` - one hour
    OneHour,
    /// `3h` - three hours
    ThreeHours,
    /// `6h` - six hours
    SixHours,
    /// `12h` - twelve hours
    TwelveHours,
    /// `24h` - one full day
    OneDay,
    /// `3d` - three days
    ThreeDays,
    /// `7d` - seven days
    SevenDays,
}

impl Ttl {
    /// All supported TTLs, shortest first. Useful for callers that present
    /// the available options.
    pub const ALL: [Ttl; 7] = [
        Ttl::OneHour,
        Ttl::ThreeHours,
        Ttl::SixHours,
        Ttl::TwelveHours,
        Ttl::OneDay,
        Ttl::ThreeDays,
        Ttl::SevenDays,
    ];

    /// Looks a label up in the registry.
    ///
    /// Returns `None` for anything that is not one of the supported labels.
    /// This is the universal "invalid TTL" signal used by both the save and
    /// load paths.
    pub fn from_label(label: &str) -> Option<Ttl> {
        match label {
            "1h" => Some(Ttl::OneHour),
            "3h" => Some(Ttl::ThreeHours),
            "6h" => Some(Ttl::SixHours),
            "12h" => Some(Ttl::TwelveHours),
            "24h" => Some(Ttl::OneDay),
            "3d" => Some(Ttl::ThreeDays),
            "7d" => Some(Ttl::SevenDays),
            _ => None,
        }
    }

    /// The registry label for this TTL, as embedded in filenames.
    pub fn label(&self) -> &'static str {
        match self {
            Ttl::OneHour => "1h",
            Ttl::ThreeHours => "3h",
            Ttl::SixHours => "6h",
            Ttl::TwelveHours => "12h",
            Ttl::OneDay => "24h",
            Ttl::ThreeDays => "3d",
            Ttl::SevenDays => "7d",
        }
    }

    /// The TTL expressed in whole hours.
    pub fn hours(&self) -> u64 {
        match self {
            Ttl::OneHour => 1,
            Ttl::ThreeHours => 3,
            Ttl::SixHours => 6,
            Ttl::TwelveHours => 12,
            Ttl::OneDay => 24,
            Ttl::ThreeDays => 72,
            Ttl::SevenDays => 168,
        }
    }

    /// The TTL as a [`Duration`].
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.hours() * 3600)
    }

    /// Computes the expiration deadline for a paste created at `created_at`.
    ///
    /// Both the lazy check on load and the background sweeper use this, so
    /// the two paths can never disagree on when a paste dies.
    pub fn expires_at(&self, created_at: SystemTime) -> SystemTime {
        created_at + self.duration()
    }
}

impl Default for Ttl {
    /// The fallback applied by callers when no TTL is supplied.
    fn default() -> Self {
        Ttl::SixHours
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contents() {
        let expected = [
            ("1h", 1),
            ("3h", 3),
            ("6h", 6),
            ("12h", 12),
            ("24h", 24),
            ("3d", 72),
            ("7d", 168),
        ];
        for (label, hours) in expected {
            let ttl = Ttl::from_label(label).unwrap();
            assert_eq!(ttl.label(), label);
            assert_eq!(ttl.hours(), hours);
        }
        assert_eq!(Ttl::ALL.len(), expected.len());
    }

    #[test]
    fn test_unknown_labels_rejected() {
        for label in ["", "2h", "1d", "24", "h1", "7D", " 1h", "forever"] {
            assert_eq!(Ttl::from_label(label), None, "label {:?}", label);
        }
    }

    #[test]
    fn test_label_round_trip() {
        for ttl in Ttl::ALL {
            assert_eq!(Ttl::from_label(ttl.label()), Some(ttl));
            assert_eq!(ttl.to_string(), ttl.label());
        }
    }

    #[test]
    fn test_expires_at() {
        let created = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        let deadline = Ttl::OneHour.expires_at(created);
        assert_eq!(deadline, created + Duration::from_secs(3600));

        let deadline = Ttl::SevenDays.expires_at(created);
        assert_eq!(deadline, created + Duration::from_secs(168 * 3600));
    }

    #[test]
    fn test_default_is_six_hours() {
        assert_eq!(Ttl::default(), Ttl::SixHours);
    }
}
