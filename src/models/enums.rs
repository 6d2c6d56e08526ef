use super::InvalidEnum;

/// Macro to generate a categorical enum with as_str + FromStr and
/// serde support that round-trips through the wire string.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name),
                        value: s.into(),
                    }),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(AppointmentStatus {
    Pending => "pending",
    Confirmed => "confirmed",
    Completed => "completed",
    Cancelled => "cancelled",
    NoShow => "no_show",
});

str_enum!(Modality {
    Remote => "remote",
    InPerson => "in_person",
});

str_enum!(PaymentStatus {
    Pending => "pending",
    Processing => "processing",
    Completed => "completed",
    Failed => "failed",
    Refunded => "refunded",
    Cancelled => "cancelled",
});

// Ordered: declaration order is severity order (Ord derives from it).
str_enum!(Severity {
    Minimal => "minimal",
    Mild => "mild",
    Moderate => "moderate",
    ModeratelySevere => "moderately_severe",
    Severe => "severe",
});

str_enum!(RiskState {
    Stable => "STABLE",
    Alert => "ALERT",
    Critical => "CRITICAL",
});

str_enum!(DeltaKind {
    Positivo => "positivo",
    Negativo => "negativo",
    Neutro => "neutro",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn appointment_status_round_trip() {
        for (variant, s) in [
            (AppointmentStatus::Pending, "pending"),
            (AppointmentStatus::Confirmed, "confirmed"),
            (AppointmentStatus::Completed, "completed"),
            (AppointmentStatus::Cancelled, "cancelled"),
            (AppointmentStatus::NoShow, "no_show"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(AppointmentStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn severity_is_ordered() {
        assert!(Severity::Minimal < Severity::Mild);
        assert!(Severity::Mild < Severity::Moderate);
        assert!(Severity::Moderate < Severity::ModeratelySevere);
        assert!(Severity::ModeratelySevere < Severity::Severe);
    }

    #[test]
    fn invalid_value_is_rejected() {
        let err = PaymentStatus::from_str("settled").unwrap_err();
        assert_eq!(err.field, "PaymentStatus");
        assert_eq!(err.value, "settled");
    }

    #[test]
    fn risk_state_serializes_upper() {
        assert_eq!(
            serde_json::to_string(&RiskState::Critical).unwrap(),
            "\"CRITICAL\""
        );
    }

    #[test]
    fn delta_kind_serializes_wire_value() {
        assert_eq!(
            serde_json::to_string(&DeltaKind::Negativo).unwrap(),
            "\"negativo\""
        );
        let parsed: DeltaKind = serde_json::from_str("\"neutro\"").unwrap();
        assert_eq!(parsed, DeltaKind::Neutro);
    }
}
