//! Operation orchestration: compress, extract, list and info.
//!
//! Compress and extract are small state machines around one or two archiver
//! invocations. Staging (tar packing before compression, tar unpacking after
//! extraction) is exactly one level deep, enforced structurally: a staged
//! sub-operation runs on an independent Session whose format is fixed to
//! plain `tar`, which never itself requires staging.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use crate::capability::CapabilityReport;
use crate::capability::parse_capabilities;
use crate::error::Error;
use crate::error::Result;
use crate::flags::FlagSet;
use crate::format;
use crate::format::LevelFamily;
use crate::listing::ArchiveListing;
use crate::listing::parse_listing;
use crate::process::command_line;
use crate::progress::ProgressScanner;
use crate::session::Session;

/// Switches applied to every invocation: suppress interactive prompts,
/// report progress on stdout, force UTF-8 console output.
fn always_flags() -> impl Iterator<Item = String> {
    ["-y", "-bsp1", "-sccUTF-8"].into_iter().map(String::from)
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Switches preserving file metadata across the tar stage: owner ids plus
/// creation/access/modification timestamps.
fn tar_file_info_flags(flags: &mut FlagSet) {
    flags.insert_bare("snoi");
    flags.insert("mtc", Some("on".to_string()));
    flags.insert("mta", Some("on".to_string()));
    flags.insert("mtm", Some("on".to_string()));
}

/// Fraction of total progress attributed to the first stage of a two-stage
/// operation; the staged stage continues from where it left off.
const STAGE_DIVISOR: u64 = 5;

impl Session {
    /// Compresses the configured source into the configured target archive.
    ///
    /// Runs a tar pre-packing stage first when the format requires it (or
    /// [`Session::set_force_tar_before`] demands it) and the source is not
    /// already tarred. On success the Session resets; on failure its
    /// configuration is preserved for inspection and retry.
    pub fn compress(&mut self) -> Result<()> {
        self.last_output.clear();
        self.gate.rearm();
        self.run_compress(true)
    }

    fn run_compress(&mut self, top_level: bool) -> Result<()> {
        let source = self.source.clone().ok_or(Error::MissingSource)?;
        let target = self.target.clone().ok_or(Error::MissingTarget)?;
        let profile = format::resolve(self.format());

        let needs_staging =
            (profile.requires_tar_staging || self.force_tar_before) && !self.already_tarred;

        // Held until the outer invocation finishes so the staged tar is
        // removed on the success path and on every error path.
        let mut stage_dir: Option<tempfile::TempDir> = None;
        let mut effective_source = source;

        if needs_staging {
            let dir = tempfile::Builder::new()
                .prefix("sevex-stage-")
                .tempdir()
                .map_err(|source| Error::Staging {
                    dir: std::env::temp_dir(),
                    source,
                })?;
            let staged = dir.path().join("staged.tar");
            tracing::debug!(staged = %staged.display(), "tar staging before compress");

            let mut stage = self.stage_session();
            stage.set_format("tar");
            stage.source = Some(effective_source);
            stage.target = Some(staged.clone());
            if self.keep_file_info_on_tar {
                tar_file_info_flags(&mut stage.flags);
            }
            stage.gate.set_sink(self.gate.sink());
            stage.gate.set_divisor(STAGE_DIVISOR);
            stage.gate.set_last(self.gate.last());
            stage.run_compress(false)?;

            self.last_output.push_str(stage.last_output());
            self.gate.set_last(stage.gate.last().max(self.gate.last()));
            effective_source = staged;
            stage_dir = Some(dir);
        }

        let mut switches = profile.default_flags.clone();
        switches.extend_from(&self.flags);
        if self.password.is_some() {
            if profile.family == LevelFamily::Zip {
                // Zip cannot encrypt names; pick the strong cipher instead.
                switches.insert("mem", Some("AES256".to_string()));
            } else if self.encrypt_names() {
                switches.insert("mhe", Some("on".to_string()));
            }
        }

        let mut argv = vec![path_arg(&self.executable), "a".to_string()];
        argv.extend(always_flags());
        argv.extend(profile.selector_flags.to_args());
        argv.extend(switches.to_args());
        if let Some(password) = &self.password {
            // Last, after all other switches, so nothing can collide with it.
            argv.push(format!("-p{password}"));
        }
        argv.push(path_arg(&target));
        argv.push(path_arg(&effective_source));

        let out = self.exec(&argv, true)?;
        self.last_output.push_str(&out);
        drop(stage_dir);

        if top_level {
            self.gate.deliver(100);
            self.reset();
        }
        Ok(())
    }

    /// Extracts the configured source archive into the configured target
    /// directory.
    ///
    /// With auto-untar enabled (the default), an archive whose listing shows
    /// exactly one `.tar` entry is unpacked in a second stage and the
    /// intermediate tar removed. The heuristic is extension-based by design;
    /// a lone non-tar file named `*.tar` will fail the second stage and that
    /// process error propagates.
    pub fn extract(&mut self) -> Result<()> {
        self.last_output.clear();
        self.gate.rearm();
        self.run_extract(true)
    }

    fn run_extract(&mut self, top_level: bool) -> Result<()> {
        let source = self.source.clone().ok_or(Error::MissingSource)?;
        let target = self.target.clone().ok_or(Error::MissingTarget)?;

        let mut tar_payload: Option<PathBuf> = None;
        if self.auto_untar {
            let listing = parse_listing(&self.list_invocation(&source)?);
            if let [only] = listing.entries.as_slice() {
                let entry = Path::new(&only.path);
                if entry
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("tar"))
                {
                    tar_payload = Some(target.join(entry));
                }
            }
        }

        if tar_payload.is_some() {
            self.gate.set_divisor(STAGE_DIVISOR);
        }

        let mut argv = vec![path_arg(&self.executable), "x".to_string()];
        argv.extend(always_flags());
        argv.extend(self.flags.to_args());
        argv.push(format!("-o{}", target.display()));
        if let Some(password) = &self.password {
            argv.push(format!("-p{password}"));
        }
        argv.push(path_arg(&source));

        let out = self.exec(&argv, true)?;
        self.last_output.push_str(&out);

        if let Some(payload) = tar_payload {
            tracing::debug!(payload = %payload.display(), "unpacking tar payload after extract");
            let mut stage = self.stage_session();
            stage.set_format("tar");
            stage.source = Some(payload);
            stage.target = Some(target);
            stage.set_auto_untar(false);
            stage.set_delete_source_after_extract(true);
            stage.set_keep_file_info_on_tar(self.keep_file_info_on_tar);
            stage.flags = self.flags.clone();
            stage.gate.set_sink(self.gate.sink());
            stage.gate.set_last(self.gate.last());
            stage.run_extract(false)?;

            self.last_output.push_str(stage.last_output());
            self.gate.set_last(stage.gate.last().max(self.gate.last()));
        }

        if self.delete_source_after_extract {
            // Best-effort: a leftover archive is not a failed extraction.
            if let Err(err) = std::fs::remove_file(&source) {
                tracing::warn!(
                    archive = %source.display(),
                    %err,
                    "could not delete source archive after extract"
                );
            }
        }

        if top_level {
            self.gate.deliver(100);
            self.reset();
        }
        Ok(())
    }

    /// Lists the configured source archive's contents.
    ///
    /// Does not reset the Session: listing is a read-only query, commonly
    /// followed by an extract on the same configuration.
    pub fn list(&mut self) -> Result<ArchiveListing> {
        let source = self.source.clone().ok_or(Error::MissingSource)?;
        let out = self.list_invocation(&source)?;
        self.last_output = out.clone();
        Ok(parse_listing(&out))
    }

    /// Queries the binary's version and format/codec/hasher catalogs.
    pub fn info(&mut self) -> Result<CapabilityReport> {
        let mut argv = vec![path_arg(&self.executable), "i".to_string()];
        argv.extend(always_flags());
        let out = self.exec(&argv, false)?;
        self.last_output = out.clone();
        Ok(parse_capabilities(&out))
    }

    /// A secondary, non-progress-reporting list invocation.
    fn list_invocation(&mut self, source: &Path) -> Result<String> {
        let mut argv = vec![path_arg(&self.executable), "l".to_string()];
        argv.extend(always_flags());
        if let Some(password) = &self.password {
            argv.push(format!("-p{password}"));
        }
        argv.push(path_arg(source));
        self.exec(&argv, false)
    }

    /// Runs one invocation, streaming stdout through the progress grammar
    /// unless suppressed. Raises [`Error::Process`] on non-zero exit with
    /// the full command line and both streams.
    fn exec(&mut self, argv: &[String], parse_progress: bool) -> Result<String> {
        let runner = Arc::clone(&self.runner);
        let timeout = self.timeout;
        let idle_timeout = self.idle_timeout;
        let command = command_line(argv);

        let gate = &mut self.gate;
        let mut scanner = ProgressScanner::new();
        let mut on_chunk = |chunk: &str| {
            if parse_progress {
                scanner.push_chunk(chunk, &mut |raw| gate.offer(raw));
            }
        };
        let outcome = runner.run(argv, &mut on_chunk, timeout, idle_timeout)?;
        if parse_progress {
            scanner.finish(&mut |raw| gate.offer(raw));
        }

        if outcome.success() {
            Ok(outcome.stdout)
        } else {
            Err(Error::Process {
                command,
                stdout: outcome.stdout,
                stderr: outcome.stderr,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::process::ProcessRunner;
    use crate::process::RunOutcome;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Scripted runner: records argument vectors, replays canned responses.
    #[derive(Default)]
    struct FakeRunner {
        calls: Mutex<Vec<Vec<String>>>,
        script: Mutex<VecDeque<(i32, String, String)>>,
    }

    impl FakeRunner {
        fn respond(&self, exit_code: i32, stdout: &str, stderr: &str) {
            self.script.lock().unwrap().push_back((
                exit_code,
                stdout.to_string(),
                stderr.to_string(),
            ));
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ProcessRunner for FakeRunner {
        fn run(
            &self,
            argv: &[String],
            on_chunk: &mut dyn FnMut(&str),
            _timeout: Option<Duration>,
            _idle_timeout: Option<Duration>,
        ) -> Result<RunOutcome> {
            self.calls.lock().unwrap().push(argv.to_vec());
            let (exit_code, stdout, stderr) = self
                .script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or((0, String::new(), String::new()));
            // Deliver in two chunks so line reassembly is exercised.
            let mid = (0..=stdout.len() / 2)
                .rev()
                .find(|i| stdout.is_char_boundary(*i))
                .unwrap_or(0);
            let (a, b) = stdout.split_at(mid);
            if !a.is_empty() {
                on_chunk(a);
            }
            if !b.is_empty() {
                on_chunk(b);
            }
            Ok(RunOutcome {
                exit_code: Some(exit_code),
                stdout,
                stderr,
            })
        }
    }

    fn session_with(runner: &Arc<FakeRunner>) -> Session {
        let mut s = Session::with_executable("/usr/bin/7zz");
        s.set_runner(Arc::clone(runner) as Arc<dyn ProcessRunner>);
        s
    }

    const SINGLE_TAR_LISTING: &str = "\
--
Path = wrapped.7z

   Date      Time    Attr         Size   Compressed  Name
------------------- ----- ------------ ------------  ----
2024-03-01 09:15:04 ....A         2048         1100  backup.tar
------------------- ----- ------------ ------------  ----
2024-03-01 09:15:04               2048         1100  1 files
";

    const TWO_ENTRY_LISTING: &str = "\
--
Path = plain.7z

   Date      Time    Attr         Size   Compressed  Name
------------------- ----- ------------ ------------  ----
2024-03-01 09:15:04 ....A          100           80  a.txt
2024-03-01 09:15:04 ....A          100           80  b.txt
------------------- ----- ------------ ------------  ----
2024-03-01 09:15:04                200          160  2 files
";

    #[test]
    fn test_compress_argv_composition_zip_with_password() {
        let runner = Arc::new(FakeRunner::default());
        let mut s = session_with(&runner);
        s.set_format("zip")
            .set_source_path("/in")
            .set_target_path("/out.zip")
            .set_password("pw")
            .add_flag("mx", Some("5"));
        s.compress().unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            vec![
                "/usr/bin/7zz",
                "a",
                "-y",
                "-bsp1",
                "-sccUTF-8",
                "-tzip",
                "-mx=5",
                "-mem=AES256",
                "-ppw",
                "/out.zip",
                "/in",
            ]
        );
    }

    #[test]
    fn test_compress_default_format_encrypts_headers() {
        let runner = Arc::new(FakeRunner::default());
        let mut s = session_with(&runner);
        s.set_source_path("/in")
            .set_target_path("/out.7z")
            .set_password("pw");
        s.compress().unwrap();
        let argv = &runner.calls()[0];
        assert!(argv.contains(&"-mhe=on".to_string()));
        assert_eq!(argv.last().unwrap(), "/in");
    }

    #[test]
    fn test_compress_encrypt_names_disabled_skips_header_flag() {
        let runner = Arc::new(FakeRunner::default());
        let mut s = session_with(&runner);
        s.set_source_path("/in")
            .set_target_path("/out.7z")
            .set_password("pw")
            .set_encrypt_names(false);
        s.compress().unwrap();
        let argv = &runner.calls()[0];
        assert!(!argv.contains(&"-mhe=on".to_string()));
        assert!(argv.contains(&"-ppw".to_string()));
    }

    #[test]
    fn test_compress_without_password_adds_no_crypto_flags() {
        let runner = Arc::new(FakeRunner::default());
        let mut s = session_with(&runner);
        s.set_source_path("/in").set_target_path("/out.7z");
        s.compress().unwrap();
        let argv = &runner.calls()[0];
        assert!(!argv.iter().any(|a| a.starts_with("-p")
            || a.starts_with("-mhe")
            || a.starts_with("-mem")));
    }

    #[test]
    fn test_compress_missing_paths_fails_before_spawn() {
        let runner = Arc::new(FakeRunner::default());
        let mut s = session_with(&runner);
        assert!(matches!(s.compress(), Err(Error::MissingSource)));
        s.set_source_path("/in");
        assert!(matches!(s.compress(), Err(Error::MissingTarget)));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_compress_resets_session_on_success() {
        let runner = Arc::new(FakeRunner::default());
        let mut s = session_with(&runner);
        s.set_format("zip")
            .set_source_path("/in")
            .set_target_path("/out.zip")
            .add_flag("mx", Some("9"));
        s.compress().unwrap();
        assert_eq!(s.format(), "7z");
        assert!(s.flags().is_empty());
        assert_eq!(s.source_path(), None);
        assert_eq!(s.last_progress(), -1);
    }

    #[test]
    fn test_compress_failure_preserves_configuration() {
        let runner = Arc::new(FakeRunner::default());
        runner.respond(2, "partial out", "E_FAIL bad archive");
        let mut s = session_with(&runner);
        s.set_format("zip")
            .set_source_path("/in")
            .set_target_path("/out.zip");
        let err = s.compress().unwrap_err();
        match err {
            Error::Process { stderr, .. } => assert!(stderr.contains("E_FAIL")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(s.format(), "zip");
        assert_eq!(s.source_path(), Some(Path::new("/in")));
    }

    #[test]
    fn test_compress_forces_final_progress_to_100() {
        let runner = Arc::new(FakeRunner::default());
        runner.respond(0, " 37% 12 file\n", "");
        let mut s = session_with(&runner);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen2 = Arc::clone(&seen);
        s.set_source_path("/in")
            .set_target_path("/out.7z")
            .set_progress_fn(move |v| seen2.lock().unwrap().push(v));
        s.compress().unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![37, 100]);
    }

    #[test]
    fn test_tar_combined_format_runs_staged_pipeline() {
        let runner = Arc::new(FakeRunner::default());
        let mut s = session_with(&runner);
        s.set_format("tar.gz")
            .set_source_path("/data")
            .set_target_path("/out.tar.gz");
        s.compress().unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);

        let stage = &calls[0];
        assert_eq!(stage[1], "a");
        assert!(stage.contains(&"-ttar".to_string()));
        assert!(stage.contains(&"-snoi".to_string()));
        assert!(stage.contains(&"-mtm=on".to_string()));
        assert!(stage.last().unwrap().ends_with("/data"));
        let staged_tar = &stage[stage.len() - 2];
        assert!(staged_tar.ends_with("staged.tar"));

        let main = &calls[1];
        assert!(main.contains(&"-t7z".to_string()));
        assert!(main.contains(&"-m0=gzip".to_string()));
        assert_eq!(main.last().unwrap(), staged_tar);
        // The staged temp file is owned by the pipeline and already removed.
        assert!(!Path::new(staged_tar).exists());
    }

    #[test]
    fn test_staging_skipped_when_already_tarred() {
        let runner = Arc::new(FakeRunner::default());
        let mut s = session_with(&runner);
        s.set_format("tar.zst")
            .set_already_tarred(true)
            .set_source_path("/data.tar")
            .set_target_path("/out.tar.zst");
        s.compress().unwrap();
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].last().unwrap(), "/data.tar");
    }

    #[test]
    fn test_force_tar_before_stages_even_for_7z() {
        let runner = Arc::new(FakeRunner::default());
        let mut s = session_with(&runner);
        s.set_force_tar_before(true)
            .set_keep_file_info_on_tar(false)
            .set_source_path("/data")
            .set_target_path("/out.7z");
        s.compress().unwrap();
        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].contains(&"-ttar".to_string()));
        assert!(!calls[0].contains(&"-snoi".to_string()));
    }

    #[test]
    fn test_staging_failure_propagates_original_error() {
        let runner = Arc::new(FakeRunner::default());
        runner.respond(1, "", "tar stage broke");
        let mut s = session_with(&runner);
        s.set_format("tar.gz")
            .set_source_path("/data")
            .set_target_path("/out.tar.gz");
        let err = s.compress().unwrap_err();
        match err {
            Error::Process { stderr, .. } => assert!(stderr.contains("tar stage broke")),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_extract_argv_and_no_untar_for_multi_entry() {
        let runner = Arc::new(FakeRunner::default());
        runner.respond(0, TWO_ENTRY_LISTING, "");
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut s = session_with(&runner);
        s.set_source_path("/plain.7z")
            .set_target_path(&out)
            .set_password("pw");
        s.extract().unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0][1], "l");
        assert!(calls[0].contains(&"-ppw".to_string()));
        assert_eq!(calls[1][1], "x");
        assert!(calls[1].contains(&format!("-o{}", out.display())));
        assert_eq!(calls[1].last().unwrap(), "/plain.7z");
    }

    #[test]
    fn test_extract_auto_untar_single_tar_payload() {
        let runner = Arc::new(FakeRunner::default());
        runner.respond(0, SINGLE_TAR_LISTING, "");
        runner.respond(0, " 50% 3 backup.tar\n", "");
        runner.respond(0, " 60% 9 some/file\n", "");
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut s = session_with(&runner);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen2 = Arc::clone(&seen);
        s.set_source_path("/wrapped.7z")
            .set_target_path(&out)
            .set_progress_fn(move |v| seen2.lock().unwrap().push(v));
        s.extract().unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1][1], "x");
        assert_eq!(calls[2][1], "x");
        assert_eq!(
            calls[2].last().unwrap(),
            &out.join("backup.tar").to_string_lossy().into_owned()
        );
        // No fourth call: the nested stage never lists or re-stages.
        // Primary stage rescaled to a fifth, nested continues, end forced.
        assert_eq!(*seen.lock().unwrap(), vec![10, 60, 100]);
    }

    #[test]
    fn test_failed_untar_extract_does_not_skew_next_progress() {
        let runner = Arc::new(FakeRunner::default());
        runner.respond(0, SINGLE_TAR_LISTING, "");
        runner.respond(2, " 50% 3 backup.tar\n", "unexpected end of archive");
        runner.respond(0, TWO_ENTRY_LISTING, "");
        runner.respond(0, " 50% 3 a.txt\n", "");
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let mut s = session_with(&runner);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen2 = Arc::clone(&seen);
        s.set_source_path("/wrapped.7z")
            .set_target_path(&out)
            .set_progress_fn(move |v| seen2.lock().unwrap().push(v));
        // The tar payload rescales to divisor 5, then the primary stage fails.
        s.extract().unwrap_err();
        assert_eq!(*seen.lock().unwrap(), vec![10]);
        seen.lock().unwrap().clear();

        // The retry is a plain two-entry extract: full-scale percentages, no
        // floor carried over from the failed run.
        s.set_source_path("/plain.7z").set_target_path(&out);
        s.extract().unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![50, 100]);
    }

    #[test]
    fn test_extract_auto_untar_disabled_skips_listing() {
        let runner = Arc::new(FakeRunner::default());
        let mut s = session_with(&runner);
        s.set_auto_untar(false)
            .set_source_path("/a.7z")
            .set_target_path("/out");
        s.extract().unwrap();
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][1], "x");
    }

    #[test]
    fn test_extract_deletes_source_best_effort() {
        let runner = Arc::new(FakeRunner::default());
        runner.respond(0, TWO_ENTRY_LISTING, "");
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("a.7z");
        std::fs::write(&archive, b"stub").unwrap();
        let mut s = session_with(&runner);
        s.set_source_path(&archive)
            .set_target_path(dir.path().join("out"))
            .set_delete_source_after_extract(true);
        s.extract().unwrap();
        assert!(!archive.exists());
    }

    #[test]
    fn test_extract_missing_delete_target_is_not_fatal() {
        let runner = Arc::new(FakeRunner::default());
        runner.respond(0, TWO_ENTRY_LISTING, "");
        let mut s = session_with(&runner);
        s.set_source_path("/never/existed.7z")
            .set_target_path("/out")
            .set_delete_source_after_extract(true);
        s.extract().unwrap();
    }

    #[test]
    fn test_list_parses_and_keeps_configuration() {
        let runner = Arc::new(FakeRunner::default());
        runner.respond(0, TWO_ENTRY_LISTING, "");
        let mut s = session_with(&runner);
        s.set_source_path("/plain.7z");
        let listing = s.list().unwrap();
        assert_eq!(listing.entries.len(), 2);
        assert_eq!(listing.totals.unwrap().files, 2);
        assert_eq!(s.source_path(), Some(Path::new("/plain.7z")));
        assert!(s.last_output().contains("a.txt"));
    }

    #[test]
    fn test_info_invocation_and_parse() {
        let runner = Arc::new(FakeRunner::default());
        runner.respond(0, "7-Zip (z) 22.01 (x64)\n\nFormats:\n 0 K  tar  tar  usta r\n", "");
        let mut s = session_with(&runner);
        let report = s.info().unwrap();
        assert_eq!(runner.calls()[0][1], "i");
        assert_eq!(report.version, "22.01");
        assert_eq!(report.formats.len(), 1);
    }
}
