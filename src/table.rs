use crate::error::TableError;
use crate::text::apply_with_counts;
use serde::Deserialize;
use std::collections::HashMap;

/// One literal find/replace pair.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Pair {
    pub from: String,
    pub to: String,
}

impl Pair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Ordered list of pairs with unique, non-empty patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionTable {
    pairs: Vec<Pair>,
}

/// A replacement that can complete a match of a pattern whose pass already
/// ran, so running the plan again over its own output may change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescanHazard {
    pub pass: Pass,
    pub pair: usize,
    pub rebuilds_pass: Pass,
    pub rebuilds: usize,
}

/// Whether inserting `to` into some text can complete an occurrence of `from`.
fn can_rebuild(to: &str, from: &str) -> bool {
    if to.is_empty() {
        // deletion joins the neighbours
        return from.chars().nth(1).is_some();
    }
    if to.contains(from) || from.contains(to) {
        return true;
    }
    to.char_indices()
        .skip(1)
        .any(|(i, _)| from.starts_with(&to[i..]))
        || from
            .char_indices()
            .skip(1)
            .any(|(i, _)| to.starts_with(&from[i..]))
}

impl SubstitutionTable {
    pub fn new(pairs: Vec<Pair>) -> Result<Self, TableError> {
        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(pairs.len());
        for (index, pair) in pairs.iter().enumerate() {
            if pair.from.is_empty() {
                return Err(TableError::EmptyPattern { index });
            }
            if let Some(&first) = seen.get(pair.from.as_str()) {
                return Err(TableError::DuplicatePattern {
                    pattern: pair.from.clone(),
                    first,
                    second: index,
                });
            }
            seen.insert(&pair.from, index);
        }
        Ok(Self { pairs })
    }

    pub fn from_pairs<I, F, T>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<String>,
        T: Into<String>,
    {
        Self::new(pairs.into_iter().map(|(f, t)| Pair::new(f, t)).collect())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pair> {
        self.pairs.iter()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|p| p.from.as_str())
    }

    pub fn get(&self, index: usize) -> Option<&Pair> {
        self.pairs.get(index)
    }

    /// Pairs whose replacement can rebuild the pattern of the same or an
    /// earlier pair. Later patterns are not hazards: they run after the
    /// replacement within the same pass.
    pub fn rescan_hazards(&self, pass: Pass) -> Vec<RescanHazard> {
        let mut hazards = Vec::new();
        for (i, pair) in self.pairs.iter().enumerate() {
            for (j, earlier) in self.pairs[..=i].iter().enumerate() {
                if can_rebuild(&pair.to, &earlier.from) {
                    hazards.push(RescanHazard {
                        pass,
                        pair: i,
                        rebuilds_pass: pass,
                        rebuilds: j,
                    });
                }
            }
        }
        hazards
    }
}

/// Which table a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    PreCorrection,
    Main,
}

impl Pass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pass::PreCorrection => "pre-correction",
            Pass::Main => "main",
        }
    }
}

/// Pre-correction table followed by the main table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionPlan {
    pub pre_corrections: SubstitutionTable,
    pub main: SubstitutionTable,
}

/// Result of running a plan over one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub text: String,
    pub pre_counts: Vec<usize>,
    pub main_counts: Vec<usize>,
}

impl Conversion {
    pub fn total_replacements(&self) -> usize {
        self.pre_counts.iter().chain(&self.main_counts).sum()
    }
}

impl SubstitutionPlan {
    pub fn new(pre_corrections: SubstitutionTable, main: SubstitutionTable) -> Self {
        Self {
            pre_corrections,
            main,
        }
    }

    pub fn table(&self, pass: Pass) -> &SubstitutionTable {
        match pass {
            Pass::PreCorrection => &self.pre_corrections,
            Pass::Main => &self.main,
        }
    }

    /// Every replacement that can make a second run change the text: hazards
    /// inside each table, then main replacements that can rebuild a
    /// pre-correction pattern.
    pub fn rescan_hazards(&self) -> Vec<RescanHazard> {
        let mut hazards = self.pre_corrections.rescan_hazards(Pass::PreCorrection);
        hazards.extend(self.main.rescan_hazards(Pass::Main));
        for (i, pair) in self.main.iter().enumerate() {
            for (j, pattern) in self.pre_corrections.patterns().enumerate() {
                if can_rebuild(&pair.to, pattern) {
                    hazards.push(RescanHazard {
                        pass: Pass::Main,
                        pair: i,
                        rebuilds_pass: Pass::PreCorrection,
                        rebuilds: j,
                    });
                }
            }
        }
        hazards
    }

    pub fn apply(&self, text: &str) -> Conversion {
        let (text, pre_counts) = apply_with_counts(text, &self.pre_corrections);
        let (text, main_counts) = apply_with_counts(&text, &self.main);
        Conversion {
            text,
            pre_counts,
            main_counts,
        }
    }

    /// Patterns that matched zero times in `conversion`, in plan order.
    pub fn unmatched<'a>(&'a self, conversion: &Conversion) -> Vec<(Pass, &'a str)> {
        let pre = self
            .pre_corrections
            .patterns()
            .zip(&conversion.pre_counts)
            .filter(|(_, n)| **n == 0)
            .map(|(p, _)| (Pass::PreCorrection, p));
        let main = self
            .main
            .patterns()
            .zip(&conversion.main_counts)
            .filter(|(_, n)| **n == 0)
            .map(|(p, _)| (Pass::Main, p));
        pre.chain(main).collect()
    }
}
