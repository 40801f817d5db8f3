//! Billing cadence of recurring escrow charges.

use serde::{Deserialize, Serialize};

/// How often a recurring charge is billed.
///
/// Deserialization is lenient: any unrecognized label degrades to [`Once`]
/// rather than failing the whole analysis, and a missing field defaults to
/// [`Annual`].
///
/// [`Once`]: PaymentFrequency::Once
/// [`Annual`]: PaymentFrequency::Annual
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PaymentFrequency {
    Monthly,
    Quarterly,
    Semiannual,
    #[default]
    Annual,
    Once,
}

impl From<String> for PaymentFrequency {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl PaymentFrequency {
    /// Lenient label parse. An empty label means the upstream record carried
    /// no frequency at all and gets the annual default; anything else that
    /// is not a known cadence is treated as a one-off bill.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "monthly" => Self::Monthly,
            "quarterly" => Self::Quarterly,
            "semiannual" | "semi-annual" => Self::Semiannual,
            "annual" | "" => Self::Annual,
            "once" => Self::Once,
            _ => Self::Once,
        }
    }

    /// Month offsets from the first due month for cadences anchored on a due
    /// date. Monthly billing walks the window instead and has no offsets.
    pub fn due_month_offsets(&self) -> &'static [u32] {
        match self {
            Self::Once | Self::Annual => &[0],
            Self::Semiannual => &[0, 6],
            Self::Quarterly => &[0, 3, 6, 9],
            Self::Monthly => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_labels() {
        assert_eq!(PaymentFrequency::from_label("monthly"), PaymentFrequency::Monthly);
        assert_eq!(PaymentFrequency::from_label("quarterly"), PaymentFrequency::Quarterly);
        assert_eq!(PaymentFrequency::from_label("semiannual"), PaymentFrequency::Semiannual);
        assert_eq!(PaymentFrequency::from_label("annual"), PaymentFrequency::Annual);
        assert_eq!(PaymentFrequency::from_label("once"), PaymentFrequency::Once);
    }

    #[test]
    fn test_labels_are_case_and_whitespace_insensitive() {
        assert_eq!(PaymentFrequency::from_label("  Quarterly "), PaymentFrequency::Quarterly);
        assert_eq!(PaymentFrequency::from_label("SEMI-ANNUAL"), PaymentFrequency::Semiannual);
    }

    #[test]
    fn test_empty_label_defaults_to_annual() {
        assert_eq!(PaymentFrequency::from_label(""), PaymentFrequency::Annual);
        assert_eq!(PaymentFrequency::from_label("   "), PaymentFrequency::Annual);
    }

    #[test]
    fn test_unknown_label_degrades_to_once() {
        assert_eq!(PaymentFrequency::from_label("biweekly"), PaymentFrequency::Once);
        assert_eq!(PaymentFrequency::from_label("???"), PaymentFrequency::Once);
    }

    #[test]
    fn test_deserialize_is_lenient() {
        let f: PaymentFrequency = serde_json::from_str("\"quarterly\"").unwrap();
        assert_eq!(f, PaymentFrequency::Quarterly);
        let f: PaymentFrequency = serde_json::from_str("\"every-blue-moon\"").unwrap();
        assert_eq!(f, PaymentFrequency::Once);
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&PaymentFrequency::Semiannual).unwrap();
        assert_eq!(json, "\"semiannual\"");
    }

    #[test]
    fn test_due_month_offsets() {
        assert_eq!(PaymentFrequency::Once.due_month_offsets(), &[0]);
        assert_eq!(PaymentFrequency::Annual.due_month_offsets(), &[0]);
        assert_eq!(PaymentFrequency::Semiannual.due_month_offsets(), &[0, 6]);
        assert_eq!(PaymentFrequency::Quarterly.due_month_offsets(), &[0, 3, 6, 9]);
        assert!(PaymentFrequency::Monthly.due_month_offsets().is_empty());
    }
}
