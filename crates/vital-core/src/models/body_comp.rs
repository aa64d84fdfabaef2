//! Body-composition snapshot from DEXA-style scans.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Subject sex as reported on a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

macro_rules! body_comp_fields {
    ($( ($field:ident, $id:literal, $name:literal, $unit:literal) ),* $(,)?) => {
        /// Sparse body-composition snapshot. Same merge semantics as
        /// bloodwork: defined values are never clobbered by absences.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct BodyCompSnapshot {
            pub scan_date: Option<NaiveDate>,
            pub sex: Option<Sex>,
            $( pub $field: Option<f64>, )*
        }

        impl BodyCompSnapshot {
            /// Canonical ids of all numeric fields, in declaration order.
            pub const KNOWN_IDS: &'static [&'static str] = &[ $( $id ),* ];

            /// Merge `other` into `self`; other's defined values win.
            pub fn merge_from(&mut self, other: &BodyCompSnapshot) {
                if other.scan_date.is_some() {
                    self.scan_date = other.scan_date;
                }
                if other.sex.is_some() {
                    self.sex = other.sex;
                }
                $( if other.$field.is_some() { self.$field = other.$field; } )*
            }

            /// Number of defined numeric values.
            pub fn defined_count(&self) -> usize {
                let mut count = 0;
                $( if self.$field.is_some() { count += 1; } )*
                count
            }

            /// Set a field by canonical id. False when the id is unknown.
            pub fn set_known(&mut self, id: &str, value: f64) -> bool {
                match id {
                    $( $id => { self.$field = Some(value); true } )*
                    _ => false,
                }
            }

            /// Read a field by canonical id.
            pub fn get_known(&self, id: &str) -> Option<f64> {
                match id {
                    $( $id => self.$field, )*
                    _ => None,
                }
            }

            /// Display name and unit for a canonical id.
            pub fn describe(id: &str) -> Option<(&'static str, &'static str)> {
                match id {
                    $( $id => Some(($name, $unit)), )*
                    _ => None,
                }
            }

            /// Build from a loosely-typed JSON object; only declared fields
            /// are accepted, non-numeric values are dropped.
            pub fn from_json(value: &serde_json::Value) -> Self {
                let mut snap = Self::default();
                $(
                    if let Some(v) = value.get($id).and_then(|v| v.as_f64()) {
                        snap.$field = Some(v);
                    }
                )*
                if let Some(date) = value
                    .get("scan_date")
                    .and_then(|v| v.as_str())
                    .and_then(|s| s.parse::<NaiveDate>().ok())
                {
                    snap.scan_date = Some(date);
                }
                if let Some(sex) = value
                    .get("sex")
                    .and_then(|v| serde_json::from_value::<Sex>(v.clone()).ok())
                {
                    snap.sex = Some(sex);
                }
                snap
            }
        }
    };
}

body_comp_fields![
    (body_fat_percent, "body_fat_percent", "Body Fat", "%"),
    (fat_mass_lbs, "fat_mass_lbs", "Fat Mass", "lbs"),
    (lean_mass_lbs, "lean_mass_lbs", "Lean Mass", "lbs"),
    (total_mass_lbs, "total_mass_lbs", "Total Mass", "lbs"),
    (bmi, "bmi", "BMI", "kg/m^2"),
    (bone_density, "bone_density", "Bone Mineral Density", "g/cm^2"),
    (bone_tscore, "bone_tscore", "Bone T-Score", "SD"),
    (bone_zscore, "bone_zscore", "Bone Z-Score", "SD"),
    (visceral_fat_lbs, "visceral_fat_lbs", "Visceral Fat Mass", "lbs"),
    (
        visceral_fat_volume,
        "visceral_fat_volume",
        "Visceral Fat Volume",
        "in^3"
    ),
    (android_fat_percent, "android_fat_percent", "Android Fat", "%"),
    (gynoid_fat_percent, "gynoid_fat_percent", "Gynoid Fat", "%"),
    (ag_ratio, "ag_ratio", "Android/Gynoid Ratio", "ratio"),
    (arms_lean_lbs, "arms_lean_lbs", "Arms Lean Mass", "lbs"),
    (legs_lean_lbs, "legs_lean_lbs", "Legs Lean Mass", "lbs"),
    (trunk_lean_lbs, "trunk_lean_lbs", "Trunk Lean Mass", "lbs"),
    (arms_fat_percent, "arms_fat_percent", "Arms Fat", "%"),
    (legs_fat_percent, "legs_fat_percent", "Legs Fat", "%"),
    (trunk_fat_percent, "trunk_fat_percent", "Trunk Fat", "%"),
    (
        appendicular_lean_lbs,
        "appendicular_lean_lbs",
        "Appendicular Lean Mass",
        "lbs"
    ),
    (almi, "almi", "Appendicular Lean Mass Index", "kg/m^2"),
    (ffmi, "ffmi", "Fat-Free Mass Index", "kg/m^2"),
    (
        resting_metabolic_rate,
        "resting_metabolic_rate",
        "Resting Metabolic Rate",
        "kcal/day"
    ),
    (water_lbs, "water_lbs", "Total Body Water", "lbs"),
];
