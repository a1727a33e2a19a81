//! Milestone table + resolution against a cumulative distance.
//!
//! Everything here is a pure function of (total distance, table). The table is
//! ordered by threshold, strictly increasing, and always starts at 0 so there
//! is a "reached" milestone for every non-negative total.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::error::ValidationError;

/// A named cumulative-distance threshold with flavor text and a reward.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MilestoneDef {
    pub id: String,
    pub name: String,
    /// Cumulative distance at which this milestone unlocks.
    pub threshold: f64,
    pub narrative: String,
    pub reward: String,
}

impl MilestoneDef {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        threshold: f64,
        narrative: impl Into<String>,
        reward: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            threshold,
            narrative: narrative.into(),
            reward: reward.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MilestoneTable {
    milestones: Vec<MilestoneDef>,
}

impl MilestoneTable {
    /// Build a validated table: non-empty, first threshold 0, thresholds
    /// strictly increasing, ids unique.
    pub fn new(milestones: Vec<MilestoneDef>) -> Result<Self, ValidationError> {
        let first = milestones
            .first()
            .ok_or_else(|| ValidationError::InvalidMilestoneTable("table is empty".into()))?;
        if first.threshold != 0.0 {
            return Err(ValidationError::InvalidMilestoneTable(format!(
                "first milestone {:?} must have threshold 0",
                first.id
            )));
        }

        for pair in milestones.windows(2) {
            if pair[1].threshold.partial_cmp(&pair[0].threshold) != Some(Ordering::Greater) {
                return Err(ValidationError::InvalidMilestoneTable(format!(
                    "threshold of {:?} ({}) must exceed {:?} ({})",
                    pair[1].id, pair[1].threshold, pair[0].id, pair[0].threshold
                )));
            }
        }

        let mut seen = HashSet::new();
        for m in &milestones {
            if !seen.insert(m.id.as_str()) {
                return Err(ValidationError::InvalidMilestoneTable(format!(
                    "duplicate id {:?}",
                    m.id
                )));
            }
        }

        Ok(Self { milestones })
    }

    /// Look up a built-in table by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "shire" | "mordor" => Some(Self::shire_to_mordor()),
            "coast" | "coast-to-coast" => Some(Self::coast_to_coast()),
            _ => None,
        }
    }

    pub fn preset_names() -> &'static [&'static str] {
        &["shire", "coast"]
    }

    /// The long road from Bag End to Mount Doom, in miles.
    pub fn shire_to_mordor() -> Self {
        let m = MilestoneDef::new;
        Self {
            milestones: vec![
                m("bag-end", "Bag End", 0.0, "The road goes ever on. You step out of the front door.", "A second breakfast"),
                m("bree", "Bree", 135.0, "The Prancing Pony is loud and warm tonight.", "A pint at the inn"),
                m("weathertop", "Weathertop", 195.0, "The old watchtower gives a long view east.", "A new pair of socks"),
                m("rivendell", "Rivendell", 458.0, "The Last Homely House. Rest while you can.", "A rest day, guilt free"),
                m("moria", "Moria", 795.0, "The doors under the mountain open for a friend.", "A new playlist"),
                m("lothlorien", "Lothlórien", 920.0, "Golden trees and a gift for the road.", "A good book"),
                m("rauros", "Falls of Rauros", 1309.0, "The fellowship splits where the river roars.", "A massage"),
                m("mount-doom", "Mount Doom", 1779.0, "The journey is done. Drop the weight.", "New running shoes"),
            ],
        }
    }

    /// Wainwright's coast-to-coast route across northern England, in miles.
    pub fn coast_to_coast() -> Self {
        let m = MilestoneDef::new;
        Self {
            milestones: vec![
                m("st-bees", "St Bees", 0.0, "Dip a boot in the Irish Sea and pick up a pebble.", "A fresh notebook"),
                m("ennerdale", "Ennerdale Bridge", 14.0, "The first fells are behind you.", "A hot chocolate"),
                m("grasmere", "Grasmere", 38.0, "Gingerbread country.", "Something sweet"),
                m("shap", "Shap", 62.0, "The Lakes give way to limestone.", "A long bath"),
                m("kirkby-stephen", "Kirkby Stephen", 82.0, "Nine Standards Rigg waits on the skyline.", "A new podcast"),
                m("reeth", "Reeth", 106.0, "Swaledale opens up green and wide.", "A lazy morning"),
                m("richmond", "Richmond", 117.0, "A castle town and a market square.", "A meal out"),
                m("glaisdale", "Glaisdale", 171.0, "The moors are nearly crossed.", "A rest day"),
                m("robin-hoods-bay", "Robin Hood's Bay", 192.0, "Drop the pebble into the North Sea.", "New walking shoes"),
            ],
        }
    }

    pub fn milestones(&self) -> &[MilestoneDef] {
        &self.milestones
    }

    /// Threshold of the final milestone.
    pub fn max_threshold(&self) -> f64 {
        self.milestones.last().map(|m| m.threshold).unwrap_or(0.0)
    }

    /// Last milestone whose threshold is <= `total`, falling back to the first.
    pub fn current(&self, total: f64) -> &MilestoneDef {
        self.milestones
            .iter()
            .rev()
            .find(|m| m.threshold <= total)
            .unwrap_or(&self.milestones[0])
    }

    /// First milestone strictly beyond `total`, if any remain.
    pub fn next(&self, total: f64) -> Option<&MilestoneDef> {
        self.milestones.iter().find(|m| m.threshold > total)
    }

    pub fn distance_to_next(&self, total: f64) -> Option<f64> {
        self.next(total).map(|m| m.threshold - total)
    }

    /// Milestones with `prev < threshold <= next`, ascending.
    pub fn crossed(&self, prev: f64, next: f64) -> Vec<&MilestoneDef> {
        self.milestones
            .iter()
            .filter(|m| prev < m.threshold && m.threshold <= next)
            .collect()
    }

    /// Only the furthest milestone reached in one step gets a notification.
    pub fn furthest_crossed(&self, prev: f64, next: f64) -> Option<&MilestoneDef> {
        self.crossed(prev, next).into_iter().last()
    }
}

impl Default for MilestoneTable {
    fn default() -> Self {
        Self::shire_to_mordor()
    }
}
