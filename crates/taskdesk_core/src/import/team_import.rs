//! Team member import: one upload adds at most `MAX_TEAM_IMPORT_ROWS`
//! members, all or nothing.
//!
//! The name column is located by header (first header cell containing
//! "name"); principals are generated for every imported member.

use crate::import::{cell, ImportError, ImportResult};
use crate::model::identity::{Principal, TeamMember};

pub const MAX_TEAM_IMPORT_ROWS: usize = 20;

pub fn parse_team_members(rows: &[Vec<String>]) -> ImportResult<Vec<TeamMember>> {
    let header = rows.first().ok_or(ImportError::NoRows)?;
    let name_index = header
        .iter()
        .position(|value| value.to_lowercase().contains("name"))
        .ok_or(ImportError::MissingColumn("Name"))?;

    let data: Vec<&Vec<String>> = rows
        .iter()
        .skip(1)
        .filter(|row| row.iter().any(|value| !value.trim().is_empty()))
        .collect();
    if data.is_empty() {
        return Err(ImportError::NoRows);
    }
    if data.len() > MAX_TEAM_IMPORT_ROWS {
        return Err(ImportError::TooManyRows {
            limit: MAX_TEAM_IMPORT_ROWS,
            found: data.len(),
        });
    }

    let mut members = Vec::with_capacity(data.len());
    let mut errors = Vec::new();
    for (index, row) in data.iter().enumerate() {
        let name = cell(row, name_index).trim();
        if name.is_empty() {
            errors.push(format!("Row {}: Name is required", index + 2));
            continue;
        }
        members.push(TeamMember::new(Principal::generate(), name));
    }

    if !errors.is_empty() {
        return Err(ImportError::InvalidRows(errors));
    }
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::{parse_team_members, MAX_TEAM_IMPORT_ROWS};
    use crate::import::ImportError;

    fn rows(lines: &[&[&str]]) -> Vec<Vec<String>> {
        lines
            .iter()
            .map(|line| line.iter().map(|value| value.to_string()).collect())
            .collect()
    }

    #[test]
    fn generates_distinct_principals() {
        let members = parse_team_members(&rows(&[&["Name"], &["John Doe"], &["Jane Smith"]])).unwrap();
        assert_eq!(members.len(), 2);
        assert_ne!(members[0].principal, members[1].principal);
        assert_eq!(members[1].name, "Jane Smith");
    }

    #[test]
    fn blank_name_rejects_whole_upload() {
        let err = parse_team_members(&rows(&[&["Id", "Full Name"], &["1", ""], &["2", "Jane"]]))
            .unwrap_err();
        assert_eq!(
            err,
            ImportError::InvalidRows(vec!["Row 2: Name is required".to_string()])
        );
    }

    #[test]
    fn more_than_limit_is_rejected() {
        let mut input = vec![vec!["Name".to_string()]];
        for index in 0..=MAX_TEAM_IMPORT_ROWS {
            input.push(vec![format!("Member {index}")]);
        }
        assert!(matches!(
            parse_team_members(&input),
            Err(ImportError::TooManyRows { found: 21, .. })
        ));
    }

    #[test]
    fn missing_name_column_is_reported() {
        let err = parse_team_members(&rows(&[&["Email"], &["a@b.c"]])).unwrap_err();
        assert_eq!(err, ImportError::MissingColumn("Name"));
    }
}
