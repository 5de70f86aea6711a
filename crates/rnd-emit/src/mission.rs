//! Mission emitter — writes bytes a [`rnd_parse::mdf::parse_mission`] would
//! accept back.

use std::io::{self, Write};

use rnd_model::Mission;

/// Write `mission` as an MD file to `w`.
pub fn emit_mission(mission: &Mission, w: &mut impl Write) -> io::Result<()> {
    writeln!(w, "MDF_name\t{}", mission.name.as_deref().unwrap_or(""))?;
    writeln!(w, "RNDF\t{}", mission.route_name.as_deref().unwrap_or(""))?;
    if let Some(v) = &mission.format_version {
        writeln!(w, "format_version\t{v}")?;
    }
    if let Some(d) = &mission.creation_date {
        writeln!(w, "creation_date\t{d}")?;
    }

    writeln!(w, "checkpoints")?;
    writeln!(w, "num_checkpoints\t{}", mission.checkpoint_ids.len())?;
    for id in &mission.checkpoint_ids {
        writeln!(w, "{id}")?;
    }
    writeln!(w, "end_checkpoints")?;

    writeln!(w, "speed_limits")?;
    writeln!(w, "num_speed_limits\t{}", mission.speed_limits.len())?;
    for sl in &mission.speed_limits {
        writeln!(w, "{}\t{}\t{}", sl.id, sl.min_speed, sl.max_speed)?;
    }
    writeln!(w, "end_speed_limits")?;

    writeln!(w, "end_file")
}
