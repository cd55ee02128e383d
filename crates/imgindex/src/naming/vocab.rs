//! Controlled vocabularies: zones, categories, view-types and per-zone rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const WORKSITE_ZONE: u32 = 0;
pub const FLOOR_PLAN_ZONE: u32 = 1;

const DEFAULT_ZONES: &[(u32, &str)] = &[
    (WORKSITE_ZONE, "worksite"),
    (FLOOR_PLAN_ZONE, "floor-plan"),
    (2, "bathroom"),
    (3, "toilet-room"),
];

const DEFAULT_CATEGORIES: &[(u32, &str)] = &[
    (0, "general view"),
    (1, "plumbing"),
    (2, "tub"),
    (3, "tiling"),
    (4, "window"),
    (5, "ceiling"),
    (6, "plastering"),
    (7, "sanitary-ware"),
    (8, "closet"),
    (9, "existing-fixtures"),
];

/// Photographic framing code (exactly 3 uppercase letters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ViewType {
    Pan,
    Gen,
    Det,
    Mac,
    Mgm,
    Mgs,
    Mgp,
    Mgb,
    Deg,
}

impl ViewType {
    pub const ALL: [ViewType; 9] = [
        ViewType::Pan,
        ViewType::Gen,
        ViewType::Det,
        ViewType::Mac,
        ViewType::Mgm,
        ViewType::Mgs,
        ViewType::Mgp,
        ViewType::Mgb,
        ViewType::Deg,
    ];

    /// Case-sensitive lookup: "gen" is not a view-type.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.code() == code)
    }

    pub fn code(&self) -> &'static str {
        match self {
            ViewType::Pan => "PAN",
            ViewType::Gen => "GEN",
            ViewType::Det => "DET",
            ViewType::Mac => "MAC",
            ViewType::Mgm => "MGM",
            ViewType::Mgs => "MGS",
            ViewType::Mgp => "MGP",
            ViewType::Mgb => "MGB",
            ViewType::Deg => "DEG",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewType::Pan => "Panoramic",
            ViewType::Gen => "General",
            ViewType::Det => "Detail",
            ViewType::Mac => "Macro",
            ViewType::Mgm => "Wall-Wall",
            ViewType::Mgs => "Wall-Floor",
            ViewType::Mgp => "Wall-Ceiling",
            ViewType::Mgb => "Wall-Tub",
            ViewType::Deg => "Damage",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A field a zone demands beyond the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRequirement {
    /// `_YYYYMMDD` suffix must be present
    CaptureDate,
    /// A year must be derivable: capture date, or a `YYYY` detail segment
    Year,
}

/// Per-zone conditional field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRule {
    pub zone_id: u32,
    pub requires: FieldRequirement,
}

/// An id → label entry declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    pub id: u32,
    pub label: String,
}

/// Zone and category label tables plus the per-zone rule table.
///
/// View-types are a closed set ([`ViewType`]) and are not configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    zones: BTreeMap<u32, String>,
    categories: BTreeMap<u32, String>,
    zone_rules: Vec<ZoneRule>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            zones: DEFAULT_ZONES
                .iter()
                .map(|(id, label)| (*id, label.to_string()))
                .collect(),
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|(id, label)| (*id, label.to_string()))
                .collect(),
            zone_rules: vec![
                ZoneRule {
                    zone_id: WORKSITE_ZONE,
                    requires: FieldRequirement::CaptureDate,
                },
                ZoneRule {
                    zone_id: FLOOR_PLAN_ZONE,
                    requires: FieldRequirement::Year,
                },
            ],
        }
    }
}

impl Vocabulary {
    /// Built-in tables extended by configuration.
    ///
    /// An entry whose id already exists replaces the label. Rules are
    /// appended; a duplicate (zone, requirement) pair is ignored.
    pub fn extended(zones: &[LabelEntry], categories: &[LabelEntry], rules: &[ZoneRule]) -> Self {
        let mut vocab = Self::default();
        for entry in zones {
            vocab.zones.insert(entry.id, entry.label.clone());
        }
        for entry in categories {
            vocab.categories.insert(entry.id, entry.label.clone());
        }
        for rule in rules {
            if !vocab.zone_rules.contains(rule) {
                vocab.zone_rules.push(*rule);
            }
        }
        vocab
    }

    pub fn zone_label(&self, zone_id: u32) -> Option<&str> {
        self.zones.get(&zone_id).map(String::as_str)
    }

    pub fn category_label(&self, category_id: u32) -> Option<&str> {
        self.categories.get(&category_id).map(String::as_str)
    }

    /// Label for reports, with a `ZONE_<n>` placeholder for unknown ids.
    pub fn zone_display(&self, zone_id: u32) -> String {
        self.zone_label(zone_id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("ZONE_{}", zone_id))
    }

    /// Label for reports, with a `CAT_<n>` placeholder for unknown ids.
    pub fn category_display(&self, category_id: u32) -> String {
        self.category_label(category_id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("CAT_{}", category_id))
    }

    pub fn zones(&self) -> impl Iterator<Item = (u32, &str)> {
        self.zones.iter().map(|(id, label)| (*id, label.as_str()))
    }

    pub fn categories(&self) -> impl Iterator<Item = (u32, &str)> {
        self.categories.iter().map(|(id, label)| (*id, label.as_str()))
    }

    pub fn zone_rules(&self) -> &[ZoneRule] {
        &self.zone_rules
    }

    /// Requirements that apply to a zone, in declaration order.
    pub fn requirements_for(&self, zone_id: u32) -> impl Iterator<Item = FieldRequirement> + '_ {
        self.zone_rules
            .iter()
            .filter(move |rule| rule.zone_id == zone_id)
            .map(|rule| rule.requires)
    }
}
