/// Wear tiers, lowest wear first. Each bucket includes its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WearGrade {
    FactoryNew,
    MinimalWear,
    FieldTested,
    WellWorn,
    BattleScarred,
}

impl WearGrade {
    /// Label written to the ledger and shown in listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FactoryNew => "崭新出厂",
            Self::MinimalWear => "略有磨损",
            Self::FieldTested => "久经沙场",
            Self::WellWorn => "战痕累累",
            Self::BattleScarred => "破损不堪",
        }
    }
}

impl std::fmt::Display for WearGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a wear value to its tier. Out-of-range values are not clamped.
pub fn grade(wear: Option<f64>) -> Option<WearGrade> {
    let w = wear?;
    if w.is_nan() {
        return None;
    }
    let tier = if w <= 0.07 {
        WearGrade::FactoryNew
    } else if w <= 0.15 {
        WearGrade::MinimalWear
    } else if w <= 0.38 {
        WearGrade::FieldTested
    } else if w <= 0.45 {
        WearGrade::WellWorn
    } else {
        WearGrade::BattleScarred
    };
    Some(tier)
}
