//! # Validation Report
//!
//! Aggregated outcome of a run and its console rendering. Passing entries
//! and section headers go to `out`; failing entries and their violations
//! go to `err`.

use std::io::{self, Write};

use crate::validate::EntryOutcome;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Outcome of validating every registry entry.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Registry version as displayed in the summary.
    pub version: String,
    /// Container outcomes in registry order.
    pub containers: Vec<EntryOutcome>,
    /// Verifier outcomes in registry order.
    pub verifiers: Vec<EntryOutcome>,
}

impl ValidationReport {
    pub fn valid_containers(&self) -> usize {
        self.containers.iter().filter(|o| o.is_valid()).count()
    }

    pub fn valid_verifiers(&self) -> usize {
        self.verifiers.iter().filter(|o| o.is_valid()).count()
    }

    /// True when no entry of either kind has a violation.
    pub fn is_valid(&self) -> bool {
        self.containers
            .iter()
            .chain(&self.verifiers)
            .all(EntryOutcome::is_valid)
    }

    /// Outcomes that failed validation, containers first.
    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.containers
            .iter()
            .chain(&self.verifiers)
            .filter(|o| !o.is_valid())
    }

    /// Process exit status for this report: 0 when valid, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.is_valid() {
            0
        } else {
            1
        }
    }

    /// Write the full console report.
    pub fn render(&self, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        writeln!(out, "🔍 Validating Noosphere Registry\n")?;
        writeln!(out, "{RULE}")?;

        writeln!(out, "\n📦 Validating Containers...\n")?;
        for outcome in &self.containers {
            render_outcome(outcome, out, err)?;
        }

        writeln!(out, "\n🔐 Validating Verifiers...\n")?;
        for outcome in &self.verifiers {
            render_outcome(outcome, out, err)?;
        }

        writeln!(out, "\n{RULE}")?;

        if !self.is_valid() {
            writeln!(out, "\n❌ Validation failed!\n")?;
            return Ok(());
        }

        writeln!(out, "\n✅ All entries are valid!")?;
        writeln!(out, "   Containers: {}", self.valid_containers())?;
        writeln!(out, "   Verifiers: {}", self.valid_verifiers())?;
        writeln!(out, "   Registry version: {}\n", self.version)?;
        Ok(())
    }
}

fn render_outcome(
    outcome: &EntryOutcome,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    if outcome.is_valid() {
        return writeln!(out, "✅ {} ({}...)", outcome.display_name, outcome.short_key());
    }

    writeln!(err, "❌ {} {} is invalid:", outcome.kind.label(), outcome.key)?;
    for violation in &outcome.violations {
        writeln!(err, "  {violation}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{EntryKind, Violation};

    fn outcome(kind: EntryKind, key: &str, name: &str, violations: Vec<Violation>) -> EntryOutcome {
        EntryOutcome {
            kind,
            key: key.to_string(),
            display_name: name.to_string(),
            violations,
        }
    }

    fn missing_name() -> Violation {
        Violation {
            instance_path: String::new(),
            schema_path: "/required".to_string(),
            message: r#""name" is a required property"#.to_string(),
        }
    }

    fn render(report: &ValidationReport) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        report.render(&mut out, &mut err).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn valid_report_prints_summary() {
        let report = ValidationReport {
            version: "1.4.0".to_string(),
            containers: vec![outcome(
                EntryKind::Container,
                "0x1234567890abcdef",
                "Oracle",
                vec![],
            )],
            verifiers: vec![
                outcome(EntryKind::Verifier, "0xaaaaaaaaaaaaaaaa", "Alpha", vec![]),
                outcome(EntryKind::Verifier, "0xbbbb", "Beta", vec![]),
            ],
        };
        assert!(report.is_valid());
        assert_eq!(report.exit_code(), 0);

        let (out, err) = render(&report);
        assert!(err.is_empty());
        assert!(out.starts_with("🔍 Validating Noosphere Registry\n"));
        assert!(out.contains("✅ Oracle (0x12345678...)\n"));
        assert!(out.contains("✅ Beta (0xbbbb...)\n"));
        assert!(out.contains("✅ All entries are valid!"));
        assert!(out.contains("   Containers: 1\n"));
        assert!(out.contains("   Verifiers: 2\n"));
        assert!(out.contains("   Registry version: 1.4.0\n"));
        assert!(!out.contains("Validation failed"));
    }

    #[test]
    fn invalid_report_lists_violations_and_fails() {
        let report = ValidationReport {
            version: "1.4.0".to_string(),
            containers: vec![
                outcome(
                    EntryKind::Container,
                    "broken-container",
                    "broken-container",
                    vec![missing_name()],
                ),
                outcome(EntryKind::Container, "0xfeedfacecafe", "Fine", vec![]),
            ],
            verifiers: vec![],
        };
        assert!(!report.is_valid());
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.valid_containers(), 1);
        assert_eq!(report.failures().count(), 1);

        let (out, err) = render(&report);
        assert!(err.contains("❌ Container broken-container is invalid:\n"));
        assert!(err.contains(r#"  (root): "name" is a required property [schema: /required]"#));
        assert!(out.contains("✅ Fine (0xfeedface...)"));
        assert!(out.contains("❌ Validation failed!"));
        assert!(!out.contains("All entries are valid"));
        assert!(!out.contains("Registry version"));
    }

    #[test]
    fn verifier_failures_use_verifier_label() {
        let report = ValidationReport {
            version: "1".to_string(),
            containers: vec![],
            verifiers: vec![outcome(EntryKind::Verifier, "0xdead", "0xdead", vec![missing_name()])],
        };
        let (_, err) = render(&report);
        assert!(err.starts_with("❌ Verifier 0xdead is invalid:"));
    }

    #[test]
    fn empty_registry_is_valid() {
        let report = ValidationReport {
            version: "0.0.1".to_string(),
            containers: vec![],
            verifiers: vec![],
        };
        let (out, _) = render(&report);
        assert!(out.contains("   Containers: 0\n"));
        assert!(out.contains("   Verifiers: 0\n"));
        assert_eq!(report.exit_code(), 0);
    }
}
