//! Grouping evaluation log records by prompt and by test case.

use std::collections::HashMap;
use std::io::BufRead;

use gaucho_types::error::ReportError;
use gaucho_types::report::OpenerLogRecord;

/// All responses logged for one test-case input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub text: String,
    pub records: Vec<OpenerLogRecord>,
}

/// Log records indexed the way the report shows them.
///
/// Prompts are numbered from 1 in first-seen order; test cases keep
/// first-seen order too.
#[derive(Debug, Clone, Default)]
pub struct OrganizedLogs {
    prompts: Vec<String>,
    prompt_numbers: HashMap<String, usize>,
    cases: Vec<TestCase>,
    case_positions: HashMap<String, usize>,
}

impl OrganizedLogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one record, registering its prompt and test case if new.
    ///
    /// An empty `text` is filed under a single space.
    pub fn push(&mut self, record: OpenerLogRecord) {
        if !self.prompt_numbers.contains_key(&record.opener_prompt) {
            self.prompts.push(record.opener_prompt.clone());
            self.prompt_numbers
                .insert(record.opener_prompt.clone(), self.prompts.len());
        }

        let case_key = if record.text.is_empty() {
            " ".to_string()
        } else {
            record.text.clone()
        };
        let position = match self.case_positions.get(&case_key) {
            Some(&position) => position,
            None => {
                self.cases.push(TestCase {
                    text: case_key.clone(),
                    records: Vec::new(),
                });
                self.case_positions.insert(case_key, self.cases.len() - 1);
                self.cases.len() - 1
            }
        };
        self.cases[position].records.push(record);
    }

    /// 1-based number of a prompt.
    pub fn prompt_number(&self, prompt: &str) -> Option<usize> {
        self.prompt_numbers.get(prompt).copied()
    }

    /// Prompts with their 1-based numbers, in order.
    pub fn prompts(&self) -> impl Iterator<Item = (usize, &str)> {
        self.prompts
            .iter()
            .enumerate()
            .map(|(i, prompt)| (i + 1, prompt.as_str()))
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Read a newline-delimited JSON log and organize it.
///
/// Blank lines are skipped; any other line that is not a valid record is an
/// error naming its 1-based line number.
pub fn organize_logs<R: BufRead>(reader: R) -> Result<OrganizedLogs, ReportError> {
    let mut logs = OrganizedLogs::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: OpenerLogRecord =
            serde_json::from_str(&line).map_err(|e| ReportError::InvalidRecord {
                line: index + 1,
                reason: e.to_string(),
            })?;
        logs.push(record);
    }
    Ok(logs)
}
