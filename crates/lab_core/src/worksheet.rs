//! Lab notebook: the closed set of worksheet questions and the student's
//! free-text answers. The reaction engine never reads any of this.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorksheetField {
    SolutionInitial,
    SolutionFinal,
    MetalInitial,
    MetalFinal,
    TempInitial,
    TempFinal,
    AnalysisQ1,
    AnalysisQ2a,
    AnalysisQ2b,
    AnalysisQ3,
    AnalysisQ4,
    AnalysisQ5,
    AnalysisQ6,
    AnalysisQ7,
    ExtensionQ1,
    ExtensionQ2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorksheetSection {
    DataCollection,
    AnalysisCopper,
    AnalysisZinc,
    RedoxConclusion,
    Extension,
}

impl WorksheetSection {
    pub fn title(self) -> &'static str {
        match self {
            Self::DataCollection => "5. Data Collection",
            Self::AnalysisCopper => "6. Analysis & Interpretation (Part A: Copper)",
            Self::AnalysisZinc => "Part B: Zinc",
            Self::RedoxConclusion => "Part C: Redox & Conclusion",
            Self::Extension => "7. Extension Questions",
        }
    }
}

impl WorksheetField {
    /// Every field in notebook order.
    pub const ALL: [WorksheetField; 16] = [
        Self::SolutionInitial,
        Self::MetalInitial,
        Self::TempInitial,
        Self::SolutionFinal,
        Self::MetalFinal,
        Self::TempFinal,
        Self::AnalysisQ1,
        Self::AnalysisQ2a,
        Self::AnalysisQ2b,
        Self::AnalysisQ3,
        Self::AnalysisQ4,
        Self::AnalysisQ5,
        Self::AnalysisQ6,
        Self::AnalysisQ7,
        Self::ExtensionQ1,
        Self::ExtensionQ2,
    ];

    /// Wire identifier, e.g. `analysisQ2a`.
    pub fn id(self) -> &'static str {
        match self {
            Self::SolutionInitial => "solutionInitial",
            Self::SolutionFinal => "solutionFinal",
            Self::MetalInitial => "metalInitial",
            Self::MetalFinal => "metalFinal",
            Self::TempInitial => "tempInitial",
            Self::TempFinal => "tempFinal",
            Self::AnalysisQ1 => "analysisQ1",
            Self::AnalysisQ2a => "analysisQ2a",
            Self::AnalysisQ2b => "analysisQ2b",
            Self::AnalysisQ3 => "analysisQ3",
            Self::AnalysisQ4 => "analysisQ4",
            Self::AnalysisQ5 => "analysisQ5",
            Self::AnalysisQ6 => "analysisQ6",
            Self::AnalysisQ7 => "analysisQ7",
            Self::ExtensionQ1 => "extensionQ1",
            Self::ExtensionQ2 => "extensionQ2",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.id() == id)
    }

    pub fn section(self) -> WorksheetSection {
        match self {
            Self::SolutionInitial
            | Self::SolutionFinal
            | Self::MetalInitial
            | Self::MetalFinal
            | Self::TempInitial
            | Self::TempFinal => WorksheetSection::DataCollection,
            Self::AnalysisQ1 | Self::AnalysisQ2a | Self::AnalysisQ2b | Self::AnalysisQ3 => {
                WorksheetSection::AnalysisCopper
            }
            Self::AnalysisQ4 | Self::AnalysisQ5 => WorksheetSection::AnalysisZinc,
            Self::AnalysisQ6 | Self::AnalysisQ7 => WorksheetSection::RedoxConclusion,
            Self::ExtensionQ1 | Self::ExtensionQ2 => WorksheetSection::Extension,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SolutionInitial | Self::SolutionFinal => "Appearance of Solution",
            Self::MetalInitial | Self::MetalFinal => "Appearance of Metal",
            Self::TempInitial | Self::TempFinal => "Temperature (°C)",
            Self::AnalysisQ1 => "1. Did the concentration of Copper(II) ions increase or decrease?",
            Self::AnalysisQ2a => "2a. Charge of neutral copper atom?",
            Self::AnalysisQ2b => "2b. Did the ion gain or lose electrons?",
            Self::AnalysisQ3 => "3. Write the half-equation for Copper",
            Self::AnalysisQ4 => "4. Did Zinc atoms gain or lose electrons?",
            Self::AnalysisQ5 => "5. Write the half-equation for Zinc",
            Self::AnalysisQ6 => "6. Full reaction equation",
            Self::AnalysisQ7 => "7. Conclusion: Why is this an 'electron transfer' reaction?",
            Self::ExtensionQ1 => "1. Was this reaction Exothermic or Endothermic?",
            Self::ExtensionQ2 => "2. Hypothesis: Copper metal into Zinc Sulfate?",
        }
    }

    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::SolutionInitial => Some("e.g., Clear blue liquid..."),
            Self::MetalInitial => Some("e.g., Shiny grey strip..."),
            Self::TempInitial => Some("e.g., 20.0"),
            Self::SolutionFinal => Some("Describe changes..."),
            Self::MetalFinal => Some("Describe deposit..."),
            Self::TempFinal => Some("Peak temperature..."),
            Self::AnalysisQ3 => Some("e.g., Cu2+ + ... -> ..."),
            Self::AnalysisQ5 => Some("e.g., Zn -> ... + ..."),
            _ => None,
        }
    }
}

/// Answers keyed by field. Every field is always present (blank until
/// the student types something).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetAnswers {
    answers: BTreeMap<WorksheetField, String>,
}

impl Default for WorksheetAnswers {
    fn default() -> Self {
        Self {
            answers: WorksheetField::ALL
                .into_iter()
                .map(|field| (field, String::new()))
                .collect(),
        }
    }
}

impl WorksheetAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: WorksheetField) -> &str {
        self.answers.get(&field).map_or("", String::as_str)
    }

    pub fn set(&mut self, field: WorksheetField, value: impl Into<String>) {
        self.answers.insert(field, value.into());
    }

    /// Fields whose answer is empty after trimming, in notebook order.
    pub fn unanswered(&self) -> Vec<WorksheetField> {
        WorksheetField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WorksheetField, &str)> + '_ {
        WorksheetField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

impl Serialize for WorksheetAnswers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for WorksheetAnswers {
    /// Missing fields stay blank; unknown identifiers are rejected.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let partial = BTreeMap::<WorksheetField, String>::deserialize(deserializer)?;
        let mut answers = Self::default();
        for (field, value) in partial {
            answers.set(field, value);
        }
        Ok(answers)
    }
}
