//! Delimited text records: `species,year_planted,height,growth_rate`

use std::str::FromStr;

use crate::domain::{DomainError, DomainResult, Species, Tree};

/// Field separator of the delimited text format.
pub const FIELD_SEPARATOR: char = ',';

const FIELD_COUNT: usize = 4;

/// Parse a single record. `line` is the 1-based line number used in errors.
///
/// Fields are trimmed before parsing. The species must match one of the
/// known names (ignoring case); anything else is `InvalidSpecies`.
pub fn parse_record(text: &str, line: usize) -> DomainResult<Tree> {
    let fields: Vec<&str> = text.split(FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(DomainError::MalformedRecord {
            line,
            reason: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
        });
    }

    let species = Species::from_name(fields[0]).ok_or_else(|| DomainError::InvalidSpecies {
        line,
        token: fields[0].to_string(),
    })?;
    let year_planted: i32 = parse_field(fields[1], "year planted", line)?;
    let height: f64 = parse_field(fields[2], "height", line)?;
    let growth_rate: f64 = parse_field(fields[3], "growth rate", line)?;

    Ok(Tree::new(species, year_planted, height, growth_rate))
}

fn parse_field<T>(field: &str, what: &str, line: usize) -> DomainResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    field.parse().map_err(|e| DomainError::MalformedRecord {
        line,
        reason: format!("{} '{}': {}", what, field, e),
    })
}

/// Parse every non-blank line of `content`, in order.
///
/// The iterator is lazy; callers decide whether to stop at the first error.
pub fn parse_records(content: &str) -> impl Iterator<Item = DomainResult<Tree>> + '_ {
    content
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(idx, text)| parse_record(text, idx + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_record_valid() {
        let tree = parse_record("Maple,2005,22.5,14.25", 1).unwrap();
        assert_eq!(tree, Tree::new(Species::Maple, 2005, 22.5, 14.25));
    }

    #[test]
    fn test_parse_record_species_ignores_case_and_whitespace() {
        let tree = parse_record(" fir , 2019 , 11.0 , 10.5 ", 1).unwrap();
        assert_eq!(tree.species(), Species::Fir);
        assert_eq!(tree.year_planted(), 2019);
    }

    #[test]
    fn test_parse_record_unknown_species() {
        let err = parse_record("Oak,2020,15.0,12.0", 3).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidSpecies {
                line: 3,
                token: "Oak".to_string()
            }
        );
    }

    #[rstest]
    #[case("Birch,2020,15.0")]
    #[case("Birch,2020,15.0,12.0,extra")]
    #[case("Birch")]
    #[case("Birch,twenty,15.0,12.0")]
    #[case("Birch,2020.5,15.0,12.0")]
    #[case("Birch,2020,tall,12.0")]
    #[case("Birch,2020,15.0,")]
    fn test_parse_record_malformed(#[case] text: &str) {
        let err = parse_record(text, 7).unwrap_err();
        assert!(
            matches!(err, DomainError::MalformedRecord { line: 7, .. }),
            "unexpected error for {:?}: {:?}",
            text,
            err
        );
    }

    #[test]
    fn test_parse_record_roundtrips_delimited_text() {
        let tree = Tree::new(Species::Birch, 2011, 0.1 + 0.2, 1.0 / 3.0);
        let parsed = parse_record(&tree.to_delimited_text(), 1).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_parse_records_skips_blank_lines_and_keeps_line_numbers() {
        let content = "Birch,2020,15.0,12.0\n\n   \nOak,2001,1.0,1.0\n";
        let results: Vec<_> = parse_records(content).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert_eq!(
            results[1],
            Err(DomainError::InvalidSpecies {
                line: 4,
                token: "Oak".to_string()
            })
        );
    }

    #[test]
    fn test_parse_records_handles_crlf() {
        let content = "Birch,2020,15.0,12.0\r\nFir,2021,16.0,11.0\r\n";
        let trees: Vec<Tree> = parse_records(content).collect::<Result<_, _>>().unwrap();
        assert_eq!(trees.len(), 2);
        assert_eq!(trees[1].growth_rate(), 11.0);
    }
}
