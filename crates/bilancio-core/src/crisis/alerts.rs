use serde::{Deserialize, Serialize};

/// Qualitative early-warning flags supplied by the analyst for one rating
/// evaluation. They are not derived from the statements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraAccountingAlert {
    pub wage_arrears: bool,
    pub supplier_arrears: bool,
    pub bank_exposure_arrears: bool,
    pub social_security_arrears: bool,
    pub inail_arrears: bool,
    pub tax_collection_claims: bool,
    pub vat_arrears: bool,
}

impl ExtraAccountingAlert {
    fn flags(&self) -> [(&'static str, bool); 7] {
        [
            ("wage_arrears", self.wage_arrears),
            ("supplier_arrears", self.supplier_arrears),
            ("bank_exposure_arrears", self.bank_exposure_arrears),
            ("social_security_arrears", self.social_security_arrears),
            ("inail_arrears", self.inail_arrears),
            ("tax_collection_claims", self.tax_collection_claims),
            ("vat_arrears", self.vat_arrears),
        ]
    }

    /// Keys of the raised flags, matching the reference-data alert keys.
    pub fn active_keys(&self) -> Vec<&'static str> {
        self.flags()
            .into_iter()
            .filter(|(_, on)| *on)
            .map(|(key, _)| key)
            .collect()
    }

    pub fn active_count(&self) -> u32 {
        self.flags().iter().filter(|(_, on)| *on).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;

    #[test]
    fn test_counts_raised_flags() {
        let alerts = ExtraAccountingAlert {
            wage_arrears: true,
            vat_arrears: true,
            ..Default::default()
        };
        assert_eq!(alerts.active_count(), 2);
        assert_eq!(alerts.active_keys(), vec!["wage_arrears", "vat_arrears"]);
        assert_eq!(ExtraAccountingAlert::default().active_count(), 0);
    }

    #[test]
    fn test_every_flag_has_a_builtin_definition() {
        let rd = ReferenceData::default();
        let all = ExtraAccountingAlert {
            wage_arrears: true,
            supplier_arrears: true,
            bank_exposure_arrears: true,
            social_security_arrears: true,
            inail_arrears: true,
            tax_collection_claims: true,
            vat_arrears: true,
        };
        assert_eq!(all.active_count(), 7);
        for key in all.active_keys() {
            assert!(rd.alert(key).is_some(), "missing definition for {key}");
        }
    }
}
