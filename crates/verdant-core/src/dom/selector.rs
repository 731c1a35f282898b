/// Compound selector: optional tag followed by any number of `#id` and
/// `.class` parts (`div`, `#app`, `.card`, `section.card#main`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Selector {
    /// Parse a selector. Returns `None` for anything outside the supported
    /// grammar (combinators, attribute selectors, pseudo-classes).
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let mut selector = Selector::default();
        let tag_len = input
            .find(['#', '.'])
            .unwrap_or(input.len());
        if tag_len > 0 {
            let tag = &input[..tag_len];
            if tag == "*" {
                // universal: no tag constraint
            } else if is_name(tag) {
                selector.tag = Some(tag.to_ascii_lowercase());
            } else {
                return None;
            }
        }

        let mut rest = &input[tag_len..];
        while let Some(kind) = rest.chars().next() {
            let body = &rest[1..];
            let len = body.find(['#', '.']).unwrap_or(body.len());
            let name = &body[..len];
            if !is_name(name) {
                return None;
            }
            match kind {
                '#' if selector.id.is_none() => selector.id = Some(name.to_string()),
                '.' => selector.classes.push(name.to_string()),
                _ => return None,
            }
            rest = &body[len..];
        }
        Some(selector)
    }

    pub fn matches(&self, tag: &str, attrs: &[(String, String)]) -> bool {
        if let Some(expected) = &self.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        let attr = |name: &str| {
            attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
        };
        if let Some(id) = &self.id {
            if attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class_list: Vec<&str> = attr("class")
                .map(|c| c.split_whitespace().collect())
                .unwrap_or_default();
            if !self.classes.iter().all(|c| class_list.contains(&c.as_str())) {
                return false;
            }
        }
        true
    }
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
