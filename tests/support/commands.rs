//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a bp command with an isolated environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - PATH starting with the stub directory
    /// - bp's own environment overrides cleared
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("bp").expect("failed to find bp binary");
        let path = match std::env::var_os("PATH") {
            Some(path) => {
                let mut dirs = vec![self.bin.path().to_path_buf()];
                dirs.extend(std::env::split_paths(&path));
                std::env::join_paths(dirs).expect("invalid PATH")
            }
            None => self.bin.path().as_os_str().to_owned(),
        };
        cmd.env("HOME", self.home.path());
        cmd.env("PATH", path);
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("BP_GPG_KEY");
        cmd.env_remove("BP_CONFIG");
        cmd.env_remove("BP_LOG");
        cmd.current_dir(self.home.path());
        cmd
    }

    /// Shortcut for `bp vault gen pass` with extra args.
    pub fn gen_pass(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(["vault", "gen", "pass"])
            .args(args)
            .output()
            .expect("failed to run bp vault gen pass")
    }

    /// Shortcut for `bp vault encrypt NAME -r KEY` with `plaintext` on stdin.
    pub fn encrypt(&self, name: &str, key: &str, plaintext: &[u8]) -> Output {
        self.cmd()
            .args(["vault", "encrypt", name, "-r", key])
            .write_stdin(plaintext.to_vec())
            .output()
            .expect("failed to run bp vault encrypt")
    }

    /// Shortcut for `bp vault decrypt NAME`.
    pub fn decrypt(&self, name: &str) -> Output {
        self.cmd()
            .args(["vault", "decrypt", name])
            .output()
            .expect("failed to run bp vault decrypt")
    }

    /// Shortcut for `bp vault list`.
    pub fn list(&self) -> Output {
        self.cmd()
            .args(["vault", "list"])
            .output()
            .expect("failed to run bp vault list")
    }

    /// Shortcut for `bp vault secrets [NAME] --compact`.
    pub fn secrets(&self, name: Option<&str>) -> Output {
        let mut cmd = self.cmd();
        cmd.args(["vault", "secrets", "--compact"]);
        if let Some(name) = name {
            cmd.arg(name);
        }
        cmd.output().expect("failed to run bp vault secrets")
    }
}
