use crate::config::Config;
use crate::workflow::SeedSource;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Seed source replaying a fixed list of seeds.
pub(crate) struct SequenceSeeds {
    seeds: VecDeque<u32>,
}

impl SequenceSeeds {
    pub(crate) fn new(seeds: &[u32]) -> Self {
        Self {
            seeds: seeds.iter().copied().collect(),
        }
    }
}

impl SeedSource for SequenceSeeds {
    fn next_seed(&mut self) -> u32 {
        self.seeds
            .pop_front()
            .expect("SequenceSeeds ran out of seeds")
    }
}

/// A temporary build tree: `root/` with `root/cores/<core>/<marker>/` folders.
pub(crate) struct BuildTree {
    pub(crate) dir: TempDir,
}

impl BuildTree {
    pub(crate) fn root(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn cores_dir(&self) -> PathBuf {
        self.dir.path().join("cores")
    }
}

/// Create a build tree where every listed core has a `cfg` folder.
pub(crate) fn create_build_tree(cores: &[&str]) -> BuildTree {
    let tree = BuildTree {
        dir: TempDir::new().unwrap(),
    };
    fs::create_dir_all(tree.cores_dir()).unwrap();
    for core in cores {
        add_core(&tree, core, "cfg");
    }
    tree
}

/// Add `cores/<core>/<marker>` to an existing tree.
pub(crate) fn add_core(tree: &BuildTree, core: &str, marker: &str) {
    fs::create_dir_all(tree.cores_dir().join(core).join(marker)).unwrap();
}

/// Config with the given targets enabled and cores selected.
pub(crate) fn config_with(targets: &[&str], cores: &[&str]) -> Config {
    let mut config = Config::default();
    for target in targets {
        config.targets.insert(target.to_string(), true);
    }
    config.cores = cores.iter().map(|c| c.to_string()).collect();
    config
}
