//! Mission Definition parser — a flat mode machine over `top`,
//! `checkpoints`, and `speed_limits` sections.

use std::io::{BufRead, Read};

use rnd_core::{fields, is_comment, LineReader};
use rnd_model::{Mission, Speedlimit};

use crate::error::{ParseError, ParseResult};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Top,
    Checkpoints,
    SpeedLimits,
}

struct Cmd {
    line: u32,
    name: String,
    args: Vec<String>,
}

fn next_command(reader: &mut LineReader<impl BufRead>) -> ParseResult<Option<Cmd>> {
    loop {
        let Some(line) = reader.next_line()? else { return Ok(None) };
        let mut toks = fields(&line.text);
        let Some(first) = toks.next() else { continue };
        if is_comment(first) {
            continue;
        }
        return Ok(Some(Cmd {
            line: line.number,
            name: first.to_string(),
            args: toks.map(str::to_string).collect(),
        }));
    }
}

/// Parse a Mission Definition file from `input`.
///
/// `num_checkpoints` and `num_speed_limits` are each guarded by their own
/// mode, symmetrically: either one, seen outside its section, falls through
/// to the generic "unknown command" branch (or, if the wrong structured
/// mode happens to be active, gets misparsed as that mode's raw data).
pub fn parse_mission(mut input: impl Read) -> ParseResult<Mission> {
    let mut buf = Vec::new();
    input.read_to_end(&mut buf)?;
    let mut reader = LineReader::new(std::io::BufReader::new(std::io::Cursor::new(&buf)));

    let mut mission = Mission::empty();
    let mut mode = Mode::Top;
    let mut declared_checkpoints: Option<u32> = None;
    let mut declared_speed_limits: Option<u32> = None;

    loop {
        let Some(cmd) = next_command(&mut reader)? else {
            return Err(ParseError::schema(reader.lineno(), "premature end of mission definition file"));
        };

        match cmd.name.as_str() {
            "MDF_name" => mission.name = cmd.args.first().cloned(),
            "RNDF" => mission.route_name = cmd.args.first().cloned(),
            "format_version" => mission.format_version = cmd.args.first().cloned(),
            "creation_date" => mission.creation_date = cmd.args.first().cloned(),
            "checkpoints" => mode = Mode::Checkpoints,
            "end_checkpoints" => mode = Mode::Top,
            "speed_limits" => mode = Mode::SpeedLimits,
            "end_speed_limits" => mode = Mode::Top,
            "num_checkpoints" if mode == Mode::Checkpoints => {
                if declared_checkpoints.is_some() {
                    return Err(ParseError::schema(cmd.line, "duplicate num_checkpoints"));
                }
                declared_checkpoints = Some(parse_count(&cmd)?);
            }
            "num_speed_limits" if mode == Mode::SpeedLimits => {
                if declared_speed_limits.is_some() {
                    return Err(ParseError::schema(cmd.line, "duplicate num_speed_limits"));
                }
                declared_speed_limits = Some(parse_count(&cmd)?);
            }
            "end_file" if mode == Mode::Top => {
                if declared_checkpoints.map(|n| n as usize) != Some(mission.checkpoint_ids.len()) {
                    return Err(ParseError::schema(cmd.line, "mission has too few checkpoints"));
                }
                if declared_speed_limits.map(|n| n as usize) != Some(mission.speed_limits.len()) {
                    return Err(ParseError::schema(cmd.line, "mission has too few speed limits"));
                }
                mission.valid = true;
                return Ok(mission);
            }
            _ if mode == Mode::Checkpoints => {
                let id: i32 = cmd.name.parse().map_err(|_| {
                    ParseError::syntax(cmd.line, format!("invalid checkpoint id \"{}\"", cmd.name))
                })?;
                if mission.checkpoint_ids.len() as u32 >= declared_checkpoints.unwrap_or(0) {
                    return Err(ParseError::schema(cmd.line, "checkpoint exceeds declared num_checkpoints"));
                }
                mission.checkpoint_ids.push(id);
            }
            _ if mode == Mode::SpeedLimits => {
                let id: i32 = cmd.name.parse().map_err(|_| {
                    ParseError::syntax(cmd.line, format!("invalid speed limit id \"{}\"", cmd.name))
                })?;
                let min = cmd.args.first().ok_or_else(|| ParseError::syntax(cmd.line, "missing min speed"))?;
                let max = cmd.args.get(1).ok_or_else(|| ParseError::syntax(cmd.line, "missing max speed"))?;
                let min_speed: i32 = min
                    .parse()
                    .map_err(|_| ParseError::syntax(cmd.line, format!("invalid min speed \"{min}\"")))?;
                let max_speed: i32 = max
                    .parse()
                    .map_err(|_| ParseError::syntax(cmd.line, format!("invalid max speed \"{max}\"")))?;
                if mission.speed_limits.len() as u32 >= declared_speed_limits.unwrap_or(0) {
                    return Err(ParseError::schema(cmd.line, "speed limit exceeds declared num_speed_limits"));
                }
                mission.speed_limits.push(Speedlimit { id, min_speed, max_speed });
            }
            other => return Err(ParseError::syntax(cmd.line, format!("unknown command {other} (mode = {})", mode as u8))),
        }
    }
}

fn parse_count(cmd: &Cmd) -> ParseResult<u32> {
    cmd.args
        .first()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ParseError::syntax(cmd.line, format!("invalid integer argument to {}", cmd.name)))
}
