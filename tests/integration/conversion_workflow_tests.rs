/*!
 * End-to-end tests for file and directory conversion
 */

use std::fs;

use anyhow::Result;
use subshift::app_controller::Controller;

use crate::common;

/// Test shifting a .vtt file forward end to end
#[test]
fn test_convertFile_withVttAndPositiveOffset_shouldWriteShiftedCopy() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "episode.vtt",
        "1\n00:00:00.243 --> 00:00:02.110\nHello\n\n",
    )?;

    let controller = Controller::new(1.5, false);
    let report = controller.convert_file(&input)?;

    assert_eq!(report.deleted_subs, 0);
    assert_eq!(
        report.output_path,
        temp_dir.path().join("{+1.50_Sec}_episode.vtt")
    );

    let output = fs::read_to_string(&report.output_path)?;
    assert_eq!(output, "1\n00:00:01.743 --> 00:00:03.610\nHello\n\n");
    Ok(())
}

/// Test shifting an .srt file backwards past the timeline start
#[test]
fn test_convertFile_withSrtAndNegativeOffset_shouldDeleteEarlyBlocks() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "movie.srt",
        "1\n\
         00:00:02,000 --> 00:00:04,000\n\
         Hi\n\
         \n\
         2\n\
         00:00:10,000 --> 00:00:12,000\n\
         Bye\n\
         \n",
    )?;

    let controller = Controller::new(-5.0, false);
    let report = controller.convert_file(&input)?;

    assert_eq!(report.deleted_subs, 1);
    assert_eq!(
        report.output_path,
        temp_dir.path().join("{-5.00_Sec}_movie.srt")
    );

    let output = fs::read_to_string(&report.output_path)?;
    assert_eq!(output, "1\n2\n00:00:05,000 --> 00:00:07,000\nBye\n\n");

    // The .srt dialect must never leak a period into a range line
    assert!(!output.contains("00:00:05.000"));
    Ok(())
}

/// Test that converting a tagged output again accumulates the tag
#[test]
fn test_convertFile_appliedTwice_shouldAccumulateFilenameTag() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_srt(temp_dir.path(), "movie.srt")?;

    let first = Controller::new(2.5, false).convert_file(&input)?;
    assert_eq!(
        first.output_path,
        temp_dir.path().join("{+2.50_Sec}_movie.srt")
    );

    let second = Controller::new(-0.5, false).convert_file(&first.output_path)?;
    assert_eq!(
        second.output_path,
        temp_dir.path().join("{+2.00_Sec}_movie.srt")
    );

    // Net shift is +2.0s: the first entry started at 1s and now starts at 3s
    let output = fs::read_to_string(&second.output_path)?;
    assert!(output.contains("00:00:03,000 --> 00:00:06,000"));
    Ok(())
}

/// Test the success status line wording
#[test]
fn test_statusMessage_withDeletionCounts_shouldMatchWording() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let input = common::create_test_vtt(temp_dir.path(), "none.vtt")?;
    let report = Controller::new(10.0, false).convert_file(&input)?;
    assert_eq!(report.status_message(), "Success.");

    let input = common::create_test_vtt(temp_dir.path(), "one.vtt")?;
    let report = Controller::new(-3.0, false).convert_file(&input)?;
    assert_eq!(report.deleted_subs, 1);
    assert_eq!(
        report.status_message(),
        "Success.\nOne subtitle was deleted at the beginning of the file."
    );

    let input = common::create_test_vtt(temp_dir.path(), "many.vtt")?;
    let report = Controller::new(-60.0, false).convert_file(&input)?;
    assert_eq!(report.deleted_subs, 2);
    assert_eq!(
        report.status_message(),
        "Success.\n2 subtitles were deleted at the beginning of the file."
    );
    Ok(())
}

/// Test that unsupported extensions are rejected before any output is written
#[test]
fn test_convertFile_withUnsupportedExtension_shouldReturnError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "notes.txt", "not a subtitle\n")?;

    let result = Controller::new(1.0, false).convert_file(&input);
    let error = result.expect_err("a .txt input must be rejected");
    assert!(error.to_string().contains("Unsupported subtitle extension"));

    // No tagged output may appear for a rejected input
    assert!(!temp_dir.path().join("{+1.00_Sec}_notes.txt").exists());
    Ok(())
}

/// Test directory discovery of subtitle files
#[test]
fn test_findSubtitleFiles_withMixedDirectory_shouldReturnOnlySubtitles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_srt(temp_dir.path(), "a.srt")?;
    common::create_test_vtt(temp_dir.path(), "b.vtt")?;
    common::create_test_file(temp_dir.path(), "c.txt", "ignored\n")?;

    let nested = temp_dir.path().join("nested");
    fs::create_dir(&nested)?;
    common::create_test_srt(&nested, "d.srt")?;

    let files = Controller::find_subtitle_files(temp_dir.path())?;
    let names: Vec<String> = files
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
        .collect();

    assert_eq!(names, vec!["a.srt", "b.vtt", "d.srt"]);
    Ok(())
}

/// Test a whole-directory run, skipping already-tagged files
#[test]
fn test_run_withDirectory_shouldConvertAllUntaggedFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_srt(temp_dir.path(), "a.srt")?;
    common::create_test_vtt(temp_dir.path(), "b.vtt")?;
    common::create_test_srt(temp_dir.path(), "{+1.00_Sec}_c.srt")?;

    let controller = Controller::new(1.0, false);
    controller.run(temp_dir.path())?;

    assert!(temp_dir.path().join("{+1.00_Sec}_a.srt").exists());
    assert!(temp_dir.path().join("{+1.00_Sec}_b.vtt").exists());

    // The already-tagged file is left alone without --include-tagged
    assert!(!temp_dir.path().join("{+2.00_Sec}_c.srt").exists());
    Ok(())
}

/// Test that --include-tagged reprocesses tagged files and updates their tag
#[test]
fn test_run_withIncludeTagged_shouldReprocessTaggedFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_srt(temp_dir.path(), "{+1.00_Sec}_c.srt")?;

    let controller = Controller::new(1.0, true);
    controller.run(temp_dir.path())?;

    assert!(temp_dir.path().join("{+2.00_Sec}_c.srt").exists());
    Ok(())
}

/// Test that a nonexistent input path is an error
#[test]
fn test_run_withMissingPath_shouldReturnError() {
    let controller = Controller::new(1.0, false);
    assert!(controller.run("./does_not_exist_12345.srt").is_err());
}
