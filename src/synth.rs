//! Build command synthesis.
//!
//! Turns a resolved [`Config`] into the shell command lines that refresh core
//! metadata (`jtframe mra`/`jtframe sch`) and compile every enabled
//! (target, core) pair (`jtcore`/`jtseed`). Nothing is executed here: the
//! caller prints the lines for a shell to consume.

use crate::config::Config;
use crate::error::Result;

/// Build tool used for regular builds.
pub const BUILD_TOOL: &str = "jtcore";

/// Build tool used for seeded builds.
pub const SEED_TOOL: &str = "jtseed";

/// Number of randomized builds `jtseed` runs per core.
pub const SEED_DEPTH: u32 = 6;

/// Macro selecting the release configuration of the firmware.
pub const RELEASE_MACRO: &str = "JTFRAME_RELEASE";

/// Macro giving private builds their OSD color.
pub const PRIVATE_MACRO: &str = "JTFRAME_OSDCOLOR=(6'h20)";

/// Generate every command line for the configuration.
///
/// `passthrough` holds the process arguments that followed a literal `--`;
/// they are appended verbatim to each build command.
pub fn synthesize_commands(config: &Config, passthrough: &[String]) -> Result<Vec<String>> {
    let cores = config.working_cores()?;
    let mut lines = metadata_commands(config, &cores);

    if config.skip_build {
        tracing::debug!("build phase skipped");
        return Ok(lines);
    }

    let macros = macro_definitions(config);
    for target in config.enabled_targets() {
        for core in &cores {
            lines.push(build_command(config, target, core, &macros, passthrough));
        }
    }
    Ok(lines)
}

/// ROM/metadata and schematic refresh commands, two per core.
pub fn metadata_commands(config: &Config, cores: &[String]) -> Vec<String> {
    let mut mra_flags = String::new();
    let mut sch_flags = String::new();
    if config.git {
        mra_flags.push_str(" --git");
        sch_flags.push_str(" --git");
    }
    if config.is_beta() {
        mra_flags.push_str(" --beta");
    }
    if config.skip_rom {
        mra_flags.push_str(" --skipROM");
    }

    cores
        .iter()
        .flat_map(|core| {
            [
                format!("jtframe mra {}{}", core, mra_flags),
                format!("jtframe sch {}{}", core, sch_flags),
            ]
        })
        .collect()
}

/// Macro definitions shared by every build command.
///
/// Order is significant: user definitions first, then private, no-HDMI,
/// no-sound and finally the beta macros.
pub fn macro_definitions(config: &Config) -> Vec<String> {
    let mut defs: Vec<String> = Vec::new();
    if !config.defs.is_empty() {
        defs.extend(config.defs.split(',').map(str::to_string));
    }
    if config.private {
        defs.push(PRIVATE_MACRO.to_string());
    }
    if config.no_hdmi {
        defs.push("MISTER_DEBUG_NOHDMI".to_string());
    }
    if config.no_sound {
        defs.push("NOSOUND".to_string());
    }
    if config.is_beta() {
        defs.push("BETA".to_string());
        defs.push("JTFRAME_CHEAT_SCRAMBLE".to_string());
        defs.push(format!("JTFRAME_UNLOCKKEY={}", config.beta));
    }
    defs
}

/// Whether the build for `target` is tracked in git.
///
/// Beta builds only keep git tracking on the reference target.
pub fn uses_git(config: &Config, target: &str) -> bool {
    config.git && !(config.is_beta() && target != config.policy.reference_target)
}

/// Compose the build command for one (target, core) pair.
pub fn build_command(
    config: &Config,
    target: &str,
    core: &str,
    macros: &[String],
    passthrough: &[String],
) -> String {
    let mut tokens: Vec<String> = Vec::new();
    if config.seed {
        tokens.push(format!("{} {}", SEED_TOOL, SEED_DEPTH));
    } else {
        tokens.push(BUILD_TOOL.to_string());
    }
    tokens.push(core.to_string());
    tokens.push(format!("-{}", target));

    for extra in [config.custom_args(target, core), config.extra.as_str()] {
        let extra = extra.trim();
        if !extra.is_empty() {
            tokens.push(extra.to_string());
        }
    }
    if !config.stamp.is_empty() {
        tokens.push(format!("--corestamp {}", config.stamp));
    }

    let dogit = uses_git(config, target);
    if dogit {
        tokens.push("--git".to_string());
    }
    if dogit || config.no_debug || config.is_beta() || config.private {
        tokens.push(format!("-d {}", RELEASE_MACRO));
    }
    for each in macros {
        let each = each.trim();
        if !each.is_empty() {
            tokens.push(format!("-d {}", each));
        }
    }
    tokens.extend(passthrough.iter().cloned());

    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::make_key;
    use std::collections::BTreeMap;

    fn config_for(targets: &[(&str, bool)], cores: &[&str]) -> Config {
        let mut config = Config::default();
        config.targets = targets
            .iter()
            .map(|(t, e)| (t.to_string(), *e))
            .collect::<BTreeMap<_, _>>();
        config.cores = cores.iter().map(|c| c.to_string()).collect();
        config
    }

    fn build_lines(lines: &[String]) -> Vec<&str> {
        lines
            .iter()
            .map(String::as_str)
            .filter(|l| !l.starts_with("jtframe "))
            .collect()
    }

    #[test]
    fn test_group_selection_end_to_end() {
        let mut config = config_for(&[("mist", true)], &[]);
        config
            .groups
            .insert("arcade".to_string(), "coreA,coreB".to_string());
        config.customs.insert(make_key("mist", "coreA"), "-x".to_string());
        config.group = "arcade".to_string();

        let lines = synthesize_commands(&config, &[]).unwrap();
        assert_eq!(
            lines,
            vec![
                "jtframe mra coreA",
                "jtframe sch coreA",
                "jtframe mra coreB",
                "jtframe sch coreB",
                "jtcore coreA -mist -x",
                "jtcore coreB -mist",
            ]
        );
    }

    #[test]
    fn test_unknown_group_is_fatal() {
        let mut config = config_for(&[("mist", true)], &["cps1"]);
        config.group = "missing".to_string();
        assert!(synthesize_commands(&config, &[]).is_err());
    }

    #[test]
    fn test_no_cores_is_fatal() {
        let config = config_for(&[("mist", true)], &[]);
        let err = synthesize_commands(&config, &[]).unwrap_err();
        assert_eq!(err.to_string(), "no cores specified");
    }

    #[test]
    fn test_disabled_targets_are_skipped() {
        let config = config_for(&[("mist", true), ("sidi", false), ("pocket", true)], &["cps1"]);
        let lines = synthesize_commands(&config, &[]).unwrap();
        assert_eq!(
            build_lines(&lines),
            vec!["jtcore cps1 -mist", "jtcore cps1 -pocket"]
        );
    }

    #[test]
    fn test_missing_custom_produces_no_token() {
        let config = config_for(&[("mist", true)], &["cps1"]);
        let macros = macro_definitions(&config);
        let line = build_command(&config, "mist", "cps1", &macros, &[]);
        assert_eq!(line, "jtcore cps1 -mist");
        assert!(!line.contains("  "));
    }

    #[test]
    fn test_metadata_flags_order() {
        let mut config = config_for(&[("mist", true)], &["cps1"]);
        config.git = true;
        config.beta = "42".to_string();
        config.skip_rom = true;

        let lines = metadata_commands(&config, &config.cores);
        assert_eq!(
            lines,
            vec![
                "jtframe mra cps1 --git --beta --skipROM",
                "jtframe sch cps1 --git",
            ]
        );
    }

    #[test]
    fn test_skip_build_stops_after_metadata() {
        let mut config = config_for(&[("mist", true)], &["cps1", "cps2"]);
        config.skip_build = true;

        let lines = synthesize_commands(&config, &[]).unwrap();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.starts_with("jtframe ")));
    }

    #[test]
    fn test_macro_order_with_everything_enabled() {
        let mut config = config_for(&[("mister", true)], &["cps1"]);
        config.defs = "USER_A, USER_B".to_string();
        config.private = true;
        config.no_hdmi = true;
        config.no_sound = true;
        config.beta = "7".to_string();

        let lines = synthesize_commands(&config, &[]).unwrap();
        assert_eq!(
            build_lines(&lines),
            vec![
                "jtcore cps1 -mister -d JTFRAME_RELEASE -d USER_A -d USER_B \
                 -d JTFRAME_OSDCOLOR=(6'h20) -d MISTER_DEBUG_NOHDMI -d NOSOUND \
                 -d BETA -d JTFRAME_CHEAT_SCRAMBLE -d JTFRAME_UNLOCKKEY=7"
            ]
        );
    }

    #[test]
    fn test_empty_user_definitions_are_dropped() {
        let mut config = config_for(&[("mist", true)], &["cps1"]);
        config.defs = "A,, ,B".to_string();
        let macros = macro_definitions(&config);
        let line = build_command(&config, "mist", "cps1", &macros, &[]);
        assert_eq!(line, "jtcore cps1 -mist -d A -d B");
    }

    #[test]
    fn test_dogit_truth_table() {
        let mut config = config_for(&[("mister", true)], &["cps1"]);
        config.policy.reference_target = "mister".to_string();

        // git off, beta off
        assert!(!uses_git(&config, "mist"));
        assert!(!uses_git(&config, "mister"));

        // git on, beta off
        config.git = true;
        assert!(uses_git(&config, "mist"));
        assert!(uses_git(&config, "mister"));

        // git on, beta on: only the reference target keeps git
        config.beta = "1".to_string();
        assert!(!uses_git(&config, "mist"));
        assert!(uses_git(&config, "mister"));

        // git off, beta on
        config.git = false;
        assert!(!uses_git(&config, "mist"));
        assert!(!uses_git(&config, "mister"));
    }

    #[test]
    fn test_release_macro_conditions() {
        let base = config_for(&[("mist", true)], &["cps1"]);
        let line = |config: &Config| build_command(config, "mist", "cps1", &[], &[]);

        assert!(!line(&base).contains(RELEASE_MACRO));

        let mut git = base.clone();
        git.git = true;
        assert_eq!(line(&git), "jtcore cps1 -mist --git -d JTFRAME_RELEASE");

        let mut nodbg = base.clone();
        nodbg.no_debug = true;
        assert_eq!(line(&nodbg), "jtcore cps1 -mist -d JTFRAME_RELEASE");

        let mut private = base.clone();
        private.private = true;
        assert!(line(&private).contains(RELEASE_MACRO));

        // A beta on a non-reference target drops --git but stays a release
        let mut beta = base.clone();
        beta.git = true;
        beta.beta = "9".to_string();
        assert_eq!(line(&beta), "jtcore cps1 -mist -d JTFRAME_RELEASE");
    }

    #[test]
    fn test_seed_stamp_extra_and_passthrough() {
        let mut config = config_for(&[("sidi", true)], &["kunio"]);
        config.seed = true;
        config.stamp = "20240101".to_string();
        config.extra = "--nolint".to_string();
        config
            .customs
            .insert(make_key("sidi", "kunio"), "-d SIDI_EXTRA".to_string());

        let passthrough = vec!["--verbose".to_string(), "-q".to_string()];
        let lines = synthesize_commands(&config, &passthrough).unwrap();
        assert_eq!(
            build_lines(&lines),
            vec![
                "jtseed 6 kunio -sidi -d SIDI_EXTRA --nolint --corestamp 20240101 --verbose -q"
            ]
        );
    }

    #[test]
    fn test_output_is_target_major() {
        let config = config_for(&[("mist", true), ("sidi", true)], &["b", "a"]);
        let lines = synthesize_commands(&config, &[]).unwrap();
        assert_eq!(
            build_lines(&lines),
            vec![
                "jtcore b -mist",
                "jtcore a -mist",
                "jtcore b -sidi",
                "jtcore a -sidi"
            ]
        );
    }
}
