use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use mcd_model::{FLAGS_HEADER, FlagRecord, RULE_COLUMNS, Rule};

/// Write rules as CSV (header included) to any writer.
pub fn write_rules<W: Write>(writer: W, rules: &[Rule]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(RULE_COLUMNS)?;
    for rule in rules {
        csv.write_record(rule.to_record())?;
    }
    csv.flush()?;
    Ok(())
}

/// Write flag rows as CSV. An empty slice still produces the header.
pub fn write_flags<W: Write>(writer: W, records: &[FlagRecord]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(FLAGS_HEADER)?;
    for record in records {
        csv.write_record(record.to_record())?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_rules_csv(path: &Path, rules: &[Rule]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_rules(file, rules).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), rows = rules.len(), "wrote rules csv");
    Ok(())
}

pub fn write_flags_csv(path: &Path, records: &[FlagRecord]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_flags(file, records).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), rows = records.len(), "wrote flags csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_flags_is_header_only() {
        let mut buf = Vec::new();
        write_flags(&mut buf, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "cpt,requires_pa,program,effective_date,notes\n"
        );
    }

    #[test]
    fn rules_header_has_eleven_columns() {
        let mut buf = Vec::new();
        write_rules(&mut buf, &[Rule::default()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().map(|l| l.split(',').count()), Some(11));
        assert_eq!(lines.next(), Some(",,,,,,,,,,"));
    }

    #[test]
    fn values_with_commas_are_quoted() {
        let rule = Rule {
            cpt_hcpcs: "29826".to_string(),
            article_title: "Billing and Coding: Knee, Shoulder".to_string(),
            ..Rule::default()
        };
        let mut buf = Vec::new();
        write_rules(&mut buf, &[rule]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"Billing and Coding: Knee, Shoulder\""));
    }
}
