//! Tab-separated instance files.
//!
//! ```text
//! W<TAB>V
//! weight<TAB>volume<TAB>value
//! ...
//! ```
//!
//! Blank lines are ignored. Fields are split on any whitespace so files
//! written with spaces load as well.

use super::types::{Instance, Item};
use crate::error::KnapsackError;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

impl Instance {
    /// Parses an instance from the text of an instance file.
    ///
    /// # Errors
    ///
    /// - [`KnapsackError::Parse`] for a missing header, a wrong field count or
    ///   a non-integer field.
    /// - [`KnapsackError::InvalidInstance`] for a negative number.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_knapsack::instance::Instance;
    ///
    /// let instance = Instance::parse("10\t10\n5\t5\t40\n4\t4\t30\n\n").unwrap();
    /// assert_eq!(instance.capacity_weight, 10);
    /// assert_eq!(instance.num_items(), 2);
    /// ```
    pub fn parse(text: &str) -> Result<Self, KnapsackError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (header_line, header) = lines.next().ok_or(KnapsackError::Parse {
            line: 1,
            message: "missing capacity line".into(),
        })?;
        let [capacity_weight, capacity_volume] = parse_fields::<2>(header_line, header)?;

        let mut items = Vec::new();
        for (line_no, line) in lines {
            let [weight, volume, value] = parse_fields::<3>(line_no, line)?;
            items.push(Item::new(weight, volume, value));
        }

        Ok(Self::new(capacity_weight, capacity_volume, items))
    }

    /// Reads and parses an instance file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KnapsackError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Renders the instance in the file format accepted by [`Instance::parse`].
    pub fn to_file_string(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}\t{}", self.capacity_weight, self.capacity_volume);
        for item in &self.items {
            let _ = writeln!(out, "{}\t{}\t{}", item.weight, item.volume, item.value);
        }
        out
    }

    /// Writes the instance to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), KnapsackError> {
        fs::write(path, self.to_file_string())?;
        Ok(())
    }
}

fn parse_fields<const N: usize>(line_no: usize, line: &str) -> Result<[u64; N], KnapsackError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != N {
        return Err(KnapsackError::Parse {
            line: line_no,
            message: format!("expected {N} fields, found {}", fields.len()),
        });
    }

    let mut out = [0u64; N];
    for (slot, field) in out.iter_mut().zip(&fields) {
        let parsed: i128 = field.parse().map_err(|_| KnapsackError::Parse {
            line: line_no,
            message: format!("'{field}' is not an integer"),
        })?;
        if parsed < 0 {
            return Err(KnapsackError::InvalidInstance(format!(
                "negative number {parsed} on line {line_no}"
            )));
        }
        *slot = u64::try_from(parsed).map_err(|_| KnapsackError::Parse {
            line: line_no,
            message: format!("'{field}' does not fit in 64 bits"),
        })?;
    }
    Ok(out)
}
