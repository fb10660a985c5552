//! Parses bank statements exported as CSV.
//!
//! A statement must have a header row naming the `date`, `description` and
//! `amount` columns, in any order. The Portuguese names `data`, `descricao`
//! and `valor` are accepted too. Other columns are ignored.
//!
//! Every row must have as many fields as the header. In a `,` separated file,
//! amounts written with a decimal comma must be quoted, e.g. `"-12,50"`.

use csv::{ReaderBuilder, StringRecord, Trim};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::validation::{DATE_FORMAT, ValidationErrors};

const BRAZILIAN_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day]/[month]/[year]");

const CONTENT_PATH: &str = "content";
const EMPTY_STATEMENT: &str = "Nenhuma transação encontrada no arquivo";
const INVALID_DATE: &str = "Data inválida (use AAAA-MM-DD ou DD/MM/AAAA)";
const INVALID_AMOUNT: &str = "Valor inválido";
const ZERO_AMOUNT: &str = "Valor não pode ser zero";
const INVALID_DESCRIPTION: &str = "Descrição deve ter entre 1 e 200 caracteres";
const FIELD_COUNT_MISMATCH: &str =
    "Número de colunas diferente do cabeçalho (valores com vírgula devem estar entre aspas)";

const DATE_COLUMNS: [&str; 2] = ["date", "data"];
const DESCRIPTION_COLUMNS: [&str; 3] = ["description", "descricao", "descrição"];
const AMOUNT_COLUMNS: [&str; 2] = ["amount", "valor"];

/// One transaction line of a bank statement.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct StatementRow {
    /// The line in the CSV text the row was read from, starting at 1.
    pub line: u64,
    pub date: Date,
    pub description: String,
    /// Negative for money that went out, positive for money that came in.
    pub amount: f64,
}

/// The positions of the columns used for importing.
#[derive(Debug, Clone, Copy)]
struct ColumnMapping {
    /// The number of fields in the header row, every row must have as many.
    field_count: usize,
    date: usize,
    description: usize,
    amount: usize,
}

impl ColumnMapping {
    fn from_headers(headers: &StringRecord, errors: &mut ValidationErrors) -> Option<Self> {
        let find = |names: &[&str], errors: &mut ValidationErrors| {
            let position = headers
                .iter()
                .position(|header| names.contains(&header.to_lowercase().as_str()));

            if position.is_none() {
                errors.add(
                    CONTENT_PATH,
                    format!("Coluna obrigatória ausente: {}", names[0]),
                );
            }

            position
        };

        let date = find(&DATE_COLUMNS, errors);
        let description = find(&DESCRIPTION_COLUMNS, errors);
        let amount = find(&AMOUNT_COLUMNS, errors);

        Some(Self {
            field_count: headers.len(),
            date: date?,
            description: description?,
            amount: amount?,
        })
    }
}

/// Parse the rows of a CSV bank statement.
///
/// Both `,` and `;` separated files are accepted, the separator is taken
/// from the header row.
///
/// # Errors
/// Returns every problem found. Problems with a row are reported with the
/// path `content[<line>]`, problems with the file as a whole with `content`.
pub(super) fn parse_statement(content: &str) -> Result<Vec<StatementRow>, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let mut reader = ReaderBuilder::new()
        .delimiter(detect_delimiter(content))
        .trim(Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mapping = match reader.headers() {
        Ok(headers) => ColumnMapping::from_headers(headers, &mut errors),
        Err(error) => {
            tracing::debug!("could not read CSV header: {error}");
            errors.add(CONTENT_PATH, "Não foi possível ler o cabeçalho do arquivo");
            None
        }
    };

    let Some(mapping) = mapping else {
        return Err(errors);
    };

    let mut rows = Vec::new();

    for record in reader.records() {
        match record {
            Ok(record) if record.iter().all(str::is_empty) => continue,
            Ok(record) if record.len() != mapping.field_count => {
                errors.add(row_path(record_line(&record)), FIELD_COUNT_MISMATCH);
            }
            Ok(record) => {
                if let Some(row) = parse_row(&record, mapping, &mut errors) {
                    rows.push(row);
                }
            }
            Err(error) => {
                let line = error.position().map(|position| position.line()).unwrap_or(0);
                tracing::debug!("could not read CSV record: {error}");
                errors.add(row_path(line), "Linha inválida");
            }
        }
    }

    if rows.is_empty() && errors.is_empty() {
        errors.add(CONTENT_PATH, EMPTY_STATEMENT);
    }

    errors.into_result(|| rows)
}

fn detect_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or_default();

    if header.contains(';') && !header.contains(',') {
        b';'
    } else {
        b','
    }
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|position| position.line()).unwrap_or(0)
}

fn row_path(line: u64) -> String {
    format!("{CONTENT_PATH}[{line}]")
}

fn parse_row(
    record: &StringRecord,
    mapping: ColumnMapping,
    errors: &mut ValidationErrors,
) -> Option<StatementRow> {
    let line = record_line(record);
    let path = row_path(line);
    let field = |index: usize| record.get(index).unwrap_or_default();

    let date = parse_date(field(mapping.date));
    if date.is_none() {
        errors.add(&path, INVALID_DATE);
    }

    let description = field(mapping.description);
    let description_length = description.chars().count();
    if description_length == 0 || description_length > 200 {
        errors.add(&path, INVALID_DESCRIPTION);
    }

    let amount = match parse_amount(field(mapping.amount)) {
        Some(amount) if amount == 0.0 => {
            errors.add(&path, ZERO_AMOUNT);
            None
        }
        Some(amount) => Some(amount),
        None => {
            errors.add(&path, INVALID_AMOUNT);
            None
        }
    };

    Some(StatementRow {
        line,
        date: date?,
        description: description.to_owned(),
        amount: amount?,
    })
}

fn parse_date(text: &str) -> Option<Date> {
    Date::parse(text, DATE_FORMAT)
        .or_else(|_| Date::parse(text, BRAZILIAN_DATE_FORMAT))
        .ok()
}

/// Parse an amount written with either `.` or `,` as the decimal separator.
///
/// When both appear, the last one is the decimal separator and the other
/// separates thousands, e.g. `1.234,56` and `1,234.56`.
fn parse_amount(text: &str) -> Option<f64> {
    let text: String = text
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let normalized = match (text.rfind(','), text.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => text.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => text.replace(',', ""),
        (Some(_), None) => text.replace(',', "."),
        _ => text,
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}
