use std::collections::BTreeSet;

const DEFAULT_LANGUAGE: &str = "python";
const IMAGE_SUFFIXES: [&str; 3] = ["png", "jpg", "jpeg"];

/// Settings for one analysis run, passed explicitly to the analyzer.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub language: String,
    /// Extensions (without the dot) parsed for definitions and usages.
    pub source_suffixes: BTreeSet<String>,
    /// Extensions listed in the content inventory without their content.
    pub asset_suffixes: BTreeSet<String>,
    pub parallel: bool,
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::for_language(DEFAULT_LANGUAGE)
    }

    pub fn for_language(language: &str) -> Self {
        Self {
            language: language.to_string(),
            source_suffixes: suffixes_for_language(language),
            asset_suffixes: IMAGE_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            parallel: true,
        }
    }

    pub fn with_source_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_suffixes = normalize(suffixes);
        self
    }

    pub fn with_asset_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.asset_suffixes = normalize(suffixes);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Union of source and asset suffixes, the inventory's filter.
    pub fn inventory_suffixes(&self) -> BTreeSet<String> {
        self.source_suffixes
            .union(&self.asset_suffixes)
            .cloned()
            .collect()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn suffixes_for_language(language: &str) -> BTreeSet<String> {
    let suffixes: &[&str] = match language {
        "python" => &["py"],
        _ => &[],
    };
    suffixes.iter().map(|s| s.to_string()).collect()
}

fn normalize<I, S>(suffixes: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    suffixes
        .into_iter()
        .map(|s| s.into().trim().trim_start_matches('.').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
