use crate::core::io::traits::StructureFile;
use crate::core::models::ion::Ion;
use crate::core::models::species::{ModelError, SpeciesCounts};
use crate::core::models::structure::{CoordinateMode, Scale, Structure, StructureBuilder};
use crate::core::utils::identifiers::{canonicalize_species_label, is_species_line, placeholder_label};
use itertools::Itertools;
use nalgebra::{Matrix3, Vector3};
use std::io::{self, BufRead, Write};
use thiserror::Error;

const SELECTIVE_DYNAMICS_LINE: &str = "Selective dynamics";

#[derive(Debug, Error)]
pub enum PoscarError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Format error on line {line}: {kind}")]
    Format { line: usize, kind: FormatErrorKind },
    #[error("Inconsistent structure: {0}")]
    Model(#[from] ModelError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    #[error("Unexpected end of input while reading the {0}")]
    UnexpectedEof(&'static str),
    #[error("Invalid float '{0}'")]
    InvalidFloat(String),
    #[error("Invalid ion count '{0}'")]
    InvalidInt(String),
    #[error("Expected 1 or 3 scaling factors, found {0}")]
    ScaleCount(usize),
    #[error("Expected {expected} values, found {found}")]
    TokenCount { expected: usize, found: usize },
    #[error("No ion counts given")]
    NoIonCounts,
    #[error("{species} species names given for {counts} ion counts")]
    SpeciesCountMismatch { species: usize, counts: usize },
    #[error("Species '{0}' is listed more than once")]
    DuplicateSpecies(String),
    #[error("Unrecognized coordinate mode '{0}'")]
    UnknownMode(String),
}

fn format_error(line: usize, kind: FormatErrorKind) -> PoscarError {
    PoscarError::Format { line, kind }
}

/// Walks the input one line at a time, tracking 1-based line numbers for error reports.
struct LineCursor<'a> {
    lines: &'a [String],
    next: usize,
}

impl<'a> LineCursor<'a> {
    fn new(lines: &'a [String]) -> Self {
        Self { lines, next: 0 }
    }

    fn next_line(&mut self, record: &'static str) -> Result<(usize, &'a str), PoscarError> {
        let line_num = self.next + 1;
        let line = self
            .lines
            .get(self.next)
            .ok_or_else(|| format_error(line_num, FormatErrorKind::UnexpectedEof(record)))?;
        self.next += 1;
        Ok((line_num, line.as_str()))
    }
}

fn parse_float(token: &str, line: usize) -> Result<f64, PoscarError> {
    token
        .parse()
        .map_err(|_| format_error(line, FormatErrorKind::InvalidFloat(token.to_string())))
}

fn parse_vector(tokens: &[&str], line: usize) -> Result<Vector3<f64>, PoscarError> {
    Ok(Vector3::new(
        parse_float(tokens[0], line)?,
        parse_float(tokens[1], line)?,
        parse_float(tokens[2], line)?,
    ))
}

fn require_tokens(tokens: &[&str], expected: usize, line: usize) -> Result<(), PoscarError> {
    if tokens.len() < expected {
        return Err(format_error(
            line,
            FormatErrorKind::TokenCount {
                expected,
                found: tokens.len(),
            },
        ));
    }
    Ok(())
}

/// Reader and writer for the VASP POSCAR format.
///
/// The grammar is fixed and line oriented:
///
/// ```text
/// comment
/// scale (1 or 3 values)
/// a1 a2 a3
/// b1 b2 b3
/// c1 c2 c3
/// [species names]
/// ion counts
/// [Selective dynamics]
/// Direct | Cartesian
/// x y z [T|F T|F T|F]      (one line per ion)
/// ```
///
/// A missing species-name line yields placeholder species `H1`, `H2`, ...; such
/// placeholders are not written back. Velocities and any trailing MD block are not read.
pub struct PoscarFile;

impl PoscarFile {
    fn parse_scale(tokens: &[&str], line: usize) -> Result<Scale, PoscarError> {
        match tokens.len() {
            1 => Ok(Scale::uniform(parse_float(tokens[0], line)?)),
            3 => Ok(Scale::per_axis([
                parse_float(tokens[0], line)?,
                parse_float(tokens[1], line)?,
                parse_float(tokens[2], line)?,
            ])),
            n => Err(format_error(line, FormatErrorKind::ScaleCount(n))),
        }
    }

    fn parse_lattice(cursor: &mut LineCursor) -> Result<Matrix3<f64>, PoscarError> {
        let mut rows = Vec::with_capacity(3);
        for _ in 0..3 {
            let (line_num, line) = cursor.next_line("lattice vectors")?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != 3 {
                return Err(format_error(
                    line_num,
                    FormatErrorKind::TokenCount {
                        expected: 3,
                        found: tokens.len(),
                    },
                ));
            }
            rows.push(parse_vector(&tokens, line_num)?.transpose());
        }
        Ok(Matrix3::from_rows(&rows))
    }

    fn parse_species(cursor: &mut LineCursor) -> Result<SpeciesCounts, PoscarError> {
        let (mut line_num, mut line) = cursor.next_line("species names or ion counts")?;
        let mut labels: Vec<String> = Vec::new();
        let mut names_line = None;
        if is_species_line(line) {
            labels = line
                .split_whitespace()
                .map(canonicalize_species_label)
                .collect();
            names_line = Some(line_num);
            (line_num, line) = cursor.next_line("ion counts")?;
        }

        let counts = line
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<usize>()
                    .map_err(|_| format_error(line_num, FormatErrorKind::InvalidInt(token.to_string())))
            })
            .collect::<Result<Vec<usize>, PoscarError>>()?;
        if counts.is_empty() {
            return Err(format_error(line_num, FormatErrorKind::NoIonCounts));
        }

        if labels.is_empty() {
            labels = (0..counts.len()).map(placeholder_label).collect();
        } else if labels.len() != counts.len() {
            return Err(format_error(
                line_num,
                FormatErrorKind::SpeciesCountMismatch {
                    species: labels.len(),
                    counts: counts.len(),
                },
            ));
        }

        SpeciesCounts::from_pairs(labels.into_iter().zip(counts)).map_err(|e| match e {
            ModelError::DuplicateSpecies(label) => format_error(
                names_line.unwrap_or(line_num),
                FormatErrorKind::DuplicateSpecies(label),
            ),
            other => PoscarError::Model(other),
        })
    }

    fn parse_ion(
        cursor: &mut LineCursor,
        species: &str,
        selective_dynamics: bool,
    ) -> Result<Ion, PoscarError> {
        let (line_num, line) = cursor.next_line("ion positions")?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let expected = if selective_dynamics { 6 } else { 3 };
        require_tokens(&tokens, expected, line_num)?;

        let mut ion = Ion::new(species, parse_vector(&tokens, line_num)?);
        if selective_dynamics {
            ion.selective_dynamics = Ion::flags_from_file_tokens([tokens[3], tokens[4], tokens[5]]);
        }
        Ok(ion)
    }
}

impl StructureFile for PoscarFile {
    type Error = PoscarError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, Self::Error> {
        let lines: Vec<String> = reader.lines().collect::<Result<_, _>>()?;
        let mut cursor = LineCursor::new(&lines);

        let (_, comment) = cursor.next_line("comment")?;

        let (line_num, line) = cursor.next_line("scaling factor")?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let scale = Self::parse_scale(&tokens, line_num)?;

        let lattice = Self::parse_lattice(&mut cursor)?;
        let species = Self::parse_species(&mut cursor)?;

        let (mut line_num, mut line) = cursor.next_line("coordinate mode")?;
        let selective_dynamics = line.trim_start().starts_with(['S', 's']);
        if selective_dynamics {
            (line_num, line) = cursor.next_line("coordinate mode")?;
        }
        let mode: CoordinateMode = line.parse().map_err(|_| {
            format_error(line_num, FormatErrorKind::UnknownMode(line.trim().to_string()))
        })?;

        let ions = species
            .expand()
            .map(|label| Self::parse_ion(&mut cursor, label, selective_dynamics))
            .collect::<Result<Vec<Ion>, PoscarError>>()?;

        let structure = StructureBuilder::new()
            .comment(comment.trim())
            .scale(scale)
            .lattice(lattice)
            .species(species)
            .selective_dynamics(selective_dynamics)
            .mode(mode)
            .ions(ions)
            .build()?;
        Ok(structure)
    }

    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "{}", structure.comment)?;

        let scale = structure.scale.components();
        if structure.scale.is_uniform() {
            writeln!(writer, "  {:>11.8}", scale[0])?;
        } else {
            writeln!(writer, "  {:>11.8}  {:>11.8}  {:>11.8}", scale[0], scale[1], scale[2])?;
        }

        for row in structure.lattice.row_iter() {
            writeln!(writer, "    {:>11.8}  {:>11.8}  {:>11.8}", row[0], row[1], row[2])?;
        }

        let species = structure.species();
        if !species.all_placeholders() {
            writeln!(
                writer,
                "{}",
                species.iter().map(|(label, _)| format!("{:>6}", label)).join(" ")
            )?;
        }
        writeln!(
            writer,
            "{}",
            species.iter().map(|(_, count)| format!("{:>6}", count)).join(" ")
        )?;

        if structure.selective_dynamics {
            writeln!(writer, "{}", SELECTIVE_DYNAMICS_LINE)?;
        }
        writeln!(writer, "{}", structure.mode())?;

        for ion in structure.ions() {
            let p = &ion.position;
            write!(writer, "{:>11.8}  {:>11.8}  {:>11.8}", p.x, p.y, p.z)?;
            if structure.selective_dynamics {
                let [a, b, c] = ion.selective_dynamics.map(Ion::flag_char);
                write!(writer, " {} {} {}", a, b, c)?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}
