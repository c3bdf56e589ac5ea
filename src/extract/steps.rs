/// Characters that mark a line as carrying an equation.
pub const EQUATION_MARKERS: [char; 9] = ['=', '+', '-', '×', '÷', '(', ')', '√', '^'];

const BULLETS: [char; 3] = ['•', '*', '-'];

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One (equation, explanation) pair.
pub struct Step {
    /// Equation text with any ordinal or bullet prefix removed. Never empty.
    pub equation: String,
    /// Prose that followed the equation, whitespace-joined. May be empty.
    pub explanation: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Ordered solution steps. Order reflects solution progression.
pub struct StepSequence(Vec<Step>);

impl StepSequence {
    /// Wrap an ordered list of steps.
    pub fn new(steps: Vec<Step>) -> Self {
        Self(steps)
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` when no equation-bearing line was found.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Steps in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.0.iter()
    }

    /// Consume into the underlying vector.
    pub fn into_vec(self) -> Vec<Step> {
        self.0
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Vec<Step>> for StepSequence {
    fn from(steps: Vec<Step>) -> Self {
        Self(steps)
    }
}

/// `true` if the line contains `=` or any arithmetic operator symbol.
pub fn is_equation_line(line: &str) -> bool {
    line.contains(EQUATION_MARKERS)
}

/// Parse free-form explanation text into ordered steps.
///
/// Lines are trimmed and blank lines skipped. An equation-bearing line closes
/// the pending step (if any) and opens a new one; other lines accumulate into
/// the pending step's explanation. Prose before the first equation has no step
/// to attach to and is dropped.
#[tracing::instrument(skip_all, fields(bytes = text.len()))]
pub fn extract_steps(text: &str) -> StepSequence {
    let mut steps = Vec::new();
    let mut current_eq = String::new();
    let mut explanation = String::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_equation_line(line) {
            if !current_eq.is_empty() {
                steps.push(Step {
                    equation: std::mem::take(&mut current_eq),
                    explanation: explanation.trim().to_string(),
                });
            }
            explanation.clear();
            current_eq = strip_step_prefix(line).to_string();
        } else {
            explanation.push_str(line);
            explanation.push(' ');
        }
    }

    if !current_eq.is_empty() {
        steps.push(Step {
            equation: current_eq,
            explanation: explanation.trim().to_string(),
        });
    }

    tracing::debug!(steps = steps.len(), "extracted steps");
    StepSequence(steps)
}

/// Remove one leading `Step N`/`Step N:` ordinal or `•`/`*`/`-` bullet.
///
/// A bullet only counts when followed by whitespace, so `-5 + x = 0` keeps its
/// sign. If nothing would remain, the trimmed line is returned unchanged.
pub fn strip_step_prefix(line: &str) -> &str {
    let line = line.trim();
    let rest = strip_ordinal(line)
        .or_else(|| strip_bullet(line))
        .map(str::trim)
        .unwrap_or(line);
    if rest.is_empty() { line } else { rest }
}

fn strip_ordinal(line: &str) -> Option<&str> {
    let after = line.strip_prefix("Step ")?;
    let digits = after.len() - after.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let after = &after[digits..];
    Some(after.strip_prefix(':').unwrap_or(after))
}

fn strip_bullet(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(BULLETS)?;
    rest.starts_with(char::is_whitespace).then_some(rest)
}

#[cfg(test)]
#[path = "../../tests/unit/extract/steps.rs"]
mod tests;
