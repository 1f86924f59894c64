use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{ReconError, Result};

/// Rows of a TSV file, split into data columns and a trailing uid column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TsvTable {
	/// Every column of a row but the last.
	pub rows: Vec<Vec<String>>,
	/// Last column of each row.
	pub uids: Vec<String>,
}

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/known.tsv` + `"bin"` → `data/known.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Non-empty lines of `path` with their 1-based line number, header skipped.
fn data_lines<P: AsRef<Path>>(path: P, header: bool) -> Result<Vec<(usize, String)>> {
	let lines = read_file(path)?;
	Ok(lines
		.into_iter()
		.enumerate()
		.skip(usize::from(header))
		.filter(|(_, line)| !line.is_empty())
		.map(|(index, line)| (index + 1, line))
		.collect())
}

/// Reads a delimited file whose last column is a row identifier.
///
/// Blank lines are skipped. Fields are not quoted.
///
/// # Errors
/// Returns an error on I/O failure or if a row has a single column.
pub fn read_tsv<P: AsRef<Path>>(path: P, header: bool, delim: char) -> Result<TsvTable> {
	let mut table = TsvTable::default();
	for (line_number, line) in data_lines(path, header)? {
		let mut fields: Vec<String> = line.split(delim).map(str::to_owned).collect();
		if fields.len() < 2 {
			return Err(ReconError::Tsv {
				line: line_number,
				reason: "expected data and uid columns".to_owned(),
			});
		}
		// Cannot fail, at least two fields
		let uid = fields.pop().unwrap_or_default();
		table.rows.push(fields);
		table.uids.push(uid);
	}
	Ok(table)
}

/// Reads a three-column delimited file (key, value, uid) into a map `key -> value`.
///
/// # Errors
/// Returns an error on I/O failure or if a row does not have exactly three columns.
pub fn read_tsv_dict<P: AsRef<Path>>(
	path: P,
	header: bool,
	delim: char,
) -> Result<BTreeMap<String, String>> {
	let mut map = BTreeMap::new();
	for (line_number, line) in data_lines(path, header)? {
		let fields: Vec<&str> = line.split(delim).collect();
		let &[key, value, _uid] = fields.as_slice() else {
			return Err(ReconError::Tsv {
				line: line_number,
				reason: format!("dict mode expects 3 columns, got {}", fields.len()),
			});
		};
		map.insert(key.to_owned(), value.to_owned());
	}
	Ok(map)
}

/// Writes `rows` as delimited lines, truncating the file or appending to it.
///
/// # Errors
/// Returns an error on I/O failure or if a field contains the delimiter or a
/// line break (fields are never quoted).
pub fn save_tsv<P, R, S>(rows: &[R], path: P, delim: char, append: bool) -> Result<()>
where
	P: AsRef<Path>,
	R: AsRef<[S]>,
	S: AsRef<str>,
{
	let file = OpenOptions::new()
		.create(true)
		.write(true)
		.append(append)
		.truncate(!append)
		.open(path)?;
	let mut writer = BufWriter::new(file);

	for (index, row) in rows.iter().enumerate() {
		let mut line = String::new();
		for (column, field) in row.as_ref().iter().enumerate() {
			let field = field.as_ref();
			if field.contains(delim) || field.contains('\n') || field.contains('\r') {
				return Err(ReconError::Tsv {
					line: index + 1,
					reason: format!("field {} cannot be written unquoted", column),
				});
			}
			if column > 0 {
				line.push(delim);
			}
			line.push_str(field);
		}
		writeln!(writer, "{}", line)?;
	}
	writer.flush()?;
	Ok(())
}
