use std::fs;
use std::path::Path;

use swmb_core::{SimulatorConfig, SwmbError};
use tracing::info;

use crate::sweep::SweepRecord;

/// Renders the driver script: one timed block per record, in record order.
///
/// Each block captures a start timestamp, runs the simulator on the record's
/// case file, captures an end timestamp and appends
/// `<start> <label> <elapsed>` to the duration log.
pub fn render_driver_script(records: &[SweepRecord], simulator: &SimulatorConfig) -> String {
    let mut script = String::new();
    for record in records {
        let mut command = vec![shell_word(&simulator.binary)];
        command.extend(simulator.leading_args.iter().map(|arg| shell_word(arg)));
        command.push(shell_word(&record.case_file_name()));

        script.push_str("start_time=`date +%s`\n");
        script.push_str(&command.join(" "));
        script.push('\n');
        script.push_str("end_time=`date +%s`\n");
        script.push_str("elapsed_time=$(($end_time - $start_time))\n");
        script.push_str(&format!(
            "string_time=\"${{start_time}} {} ${{elapsed_time}}\"\n",
            record.label
        ));
        script.push_str(&format!(
            "echo ${{string_time}} >> {}\n\n",
            shell_word(&simulator.duration_log)
        ));
    }
    script
}

/// Writes the driver script and marks it executable on Unix.
pub fn write_driver_script(
    path: &Path,
    records: &[SweepRecord],
    simulator: &SimulatorConfig,
) -> Result<(), SwmbError> {
    let io_err = |err| SwmbError::io("swmb_exp.driver_write", path, err);
    fs::write(path, render_driver_script(records, simulator)).map_err(io_err)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(io_err)?;
    }
    info!(path = %path.display(), runs = records.len(), "driver script written");
    Ok(())
}

fn shell_word(word: &str) -> String {
    if word.is_empty() {
        return "\"\"".to_string();
    }
    let plain = word
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "_-+./=:,@%".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_words_are_quoted_when_needed() {
        assert_eq!(shell_word(""), "\"\"");
        assert_eq!(shell_word("delta1_10p00.txt"), "delta1_10p00.txt");
        assert_eq!(shell_word("my run.txt"), "'my run.txt'");
        assert_eq!(shell_word("it's"), r"'it'\''s'");
    }
}
