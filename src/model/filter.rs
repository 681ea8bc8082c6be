// Keyword filter over icon names.
//
// "copy save" keeps names containing both words; "copy, save" keeps names
// containing either. Matching ignores case.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterExpression {
    groups: Vec<Vec<String>>,
}

impl FilterExpression {
    /// Commas separate groups, whitespace separates keywords within a group.
    /// An empty segment between commas becomes a group with no keywords,
    /// which matches every name.
    pub fn parse(pattern: &str) -> Option<Self> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return None;
        }

        let groups = pattern
            .split(',')
            .map(|segment| {
                segment
                    .split_whitespace()
                    .map(|keyword| keyword.to_lowercase())
                    .collect()
            })
            .collect();

        Some(Self { groups })
    }

    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }

    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.groups
            .iter()
            .any(|group| group.iter().all(|keyword| name.contains(keyword.as_str())))
    }
}

/// Keeps the names matching `pattern`, in their original order. A blank
/// pattern keeps everything.
pub fn filter<'a, S: AsRef<str>>(names: &'a [S], pattern: &str) -> Vec<&'a str> {
    match FilterExpression::parse(pattern) {
        Some(expr) => names
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|name| expr.matches(name))
            .collect(),
        None => names.iter().map(AsRef::<str>::as_ref).collect(),
    }
}
