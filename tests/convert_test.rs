use std::fs;
use std::path::Path;

use anyhow::Result;
use rate_converter::convert::date::DateNormalizer;
use rate_converter::csv_io::convert_file_with_observer;
use rate_converter::convert::pipeline::NoopObserver;
use rate_converter::{convert_file, ConversionSummary, ConvertError, ProviderRegistry, ScanState};
use tempfile::tempdir;

const VODAFONE_EXPORT: &str = "\
Vodafone Carrier Services,,,,,,,,
International Voice Price List,,,,,,,,
,,,,,,,,
Country,Destination,Type,CC,NDC,Rate (GBP),Effective Date,,Comments
United States,California,Fixed,1,310,0.0120,02-Jan-2012,,Rate increase
United Kingdom,Mobile,Mobile,44,7,0.0850,02-Jan-2012,,Rate decreased
\"Korea, Republic of\",Seoul,Fixed,82,2,0.0200,15-Feb-2012,,
,,,,,,,,
Prices exclude VAT,,,,,,,,
";

const TMOBILE_EXPORT: &str = "\
T-Mobile Wholesale,,,,,,,
Destination,Zone,Dial Code,,,Price,Valid From,Remarks
Austria,A,43,,,\"$ 0.0321 per minute\",01/15/2012,
Belgium Mobile,B,324,,,$0.1500,1/15/2012,increase
,,,,,,,
";

const SPRINT_EXPORT: &str = "Sprint International Rates\n\
Destination\tCode\tRate\tNotes\tRegion\tEffective\n\
------\t----\t----\t----\t----\t----\n\
USA\t1\t0.01\textra\textra\tJan 02 2012\n\
Mexico\t52\t0.045\t\t\tFeb 01 2012\n\
End of report\n\
Canada\t1\t0.02\t\t\tbogus date\n";

fn run(provider: &str, input: &str, dir: &Path) -> Result<(String, usize)> {
    let (output, summary) = run_with_summary(provider, input, dir)?;
    Ok((output, summary.records_written))
}

fn run_with_summary(provider: &str, input: &str, dir: &Path) -> Result<(String, ConversionSummary)> {
    let registry = ProviderRegistry::new();
    let profile = registry.lookup(provider)?;

    let in_path = dir.join(format!("{}.csv", provider));
    let out_path = dir.join(format!("{}.out", provider));
    fs::write(&in_path, input)?;

    let summary = convert_file(profile, &in_path, &out_path)?;
    assert_eq!(summary.state, ScanState::Done);
    Ok((fs::read_to_string(&out_path)?, summary))
}

#[test]
fn test_vodafone_export() -> Result<()> {
    let dir = tempdir()?;
    let (output, written) = run("vodafone", VODAFONE_EXPORT, dir.path())?;

    assert_eq!(written, 3);
    assert_eq!(
        output,
        "United States-California|1310|0.012|20120102|+\n\
         United Kingdom-Mobile|447|0.085|20120102|-\n\
         Korea, Republic of-Seoul|822|0.02|20120215|=\n"
    );
    Ok(())
}

#[test]
fn test_tmobile_export() -> Result<()> {
    let dir = tempdir()?;
    let (output, written) = run("TMobile", TMOBILE_EXPORT, dir.path())?;

    assert_eq!(written, 2);
    assert_eq!(output, "Austria|43|0.0321|20120115|=\nBelgium Mobile|324|0.1500|20120115|+\n");
    Ok(())
}

#[test]
fn test_sprint_export_ignores_rows_after_data() -> Result<()> {
    let dir = tempdir()?;
    let (output, written) = run("sprint", SPRINT_EXPORT, dir.path())?;

    assert_eq!(written, 2);
    assert_eq!(output, "USA|1|0.01|20120102|=\nMexico|52|0.045|20120201|=\n");
    Ok(())
}

#[test]
fn test_blank_line_ends_sprint_data() -> Result<()> {
    let dir = tempdir()?;
    for gap in ["", "   ", "\t\t\t\t\t"] {
        let input = format!(
            "----\t----\nUSA\t1\t0.01\tx\tx\tJan 02 2012\n{}\nCAN\t1\t0.02\tx\tx\tJan 03 2012\n",
            gap
        );
        let (output, summary) = run_with_summary("sprint", &input, dir.path())?;

        assert_eq!(output, "USA|1|0.01|20120102|=\n");
        assert_eq!(summary.records_written, 1);
        assert_eq!(summary.end_of_data_line, Some(3));
    }
    Ok(())
}

#[test]
fn test_blank_line_ends_vodafone_data() -> Result<()> {
    let dir = tempdir()?;
    for gap in ["", "  ", ",,,,,,,,"] {
        let input = format!(
            "Country,Destination,Type,CC,NDC,Rate,Date,,Comments\n\
             Spain,Madrid,Fixed,34,91,0.0100,02-Jan-2012,,\n\
             {}\n\
             France,Paris,Fixed,33,1,0.0200,02-Jan-2012,,\n",
            gap
        );
        let (output, summary) = run_with_summary("vodafone", &input, dir.path())?;

        assert_eq!(output, "Spain-Madrid|3491|0.01|20120102|=\n");
        assert_eq!(summary.end_of_data_line, Some(3));
    }
    Ok(())
}

#[test]
fn test_blank_line_ends_tmobile_data() -> Result<()> {
    let dir = tempdir()?;
    for gap in ["", " \t ", ",,,,,,,"] {
        let input = format!(
            "Destination,Zone,Dial Code,,,Price,Valid From,Remarks\r\n\
             Austria,A,43,,,$0.0321,01/15/2012,\r\n\
             {}\r\n\
             Belgium,B,32,,,$0.0400,01/15/2012,\r\n",
            gap
        );
        let (output, summary) = run_with_summary("tmobile", &input, dir.path())?;

        assert_eq!(output, "Austria|43|0.0321|20120115|=\n");
        assert_eq!(summary.end_of_data_line, Some(3));
    }
    Ok(())
}

#[test]
fn test_conversion_is_idempotent() -> Result<()> {
    let dir = tempdir()?;
    let (first, _) = run("vodafone", VODAFONE_EXPORT, dir.path())?;
    let (second, _) = run("vodafone", VODAFONE_EXPORT, dir.path())?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_effective_dates_round_trip_to_source() -> Result<()> {
    let dir = tempdir()?;
    let (output, _) = run("sprint", SPRINT_EXPORT, dir.path())?;

    let registry = ProviderRegistry::new();
    let dates: DateNormalizer = registry.lookup("sprint")?.dates;
    let restored: Vec<String> = output
        .lines()
        .map(|line| dates.to_source_format(line.split('|').nth(3).unwrap()).unwrap())
        .collect();
    assert_eq!(restored, vec!["Jan 02 2012", "Feb 01 2012"]);
    Ok(())
}

#[test]
fn test_missing_header_fails_and_leaves_no_output() -> Result<()> {
    let dir = tempdir()?;
    let registry = ProviderRegistry::new();
    let profile = registry.lookup("sprint")?;

    let in_path = dir.path().join("rates.csv");
    let out_path = dir.path().join("rates.out");
    fs::write(&in_path, "just a title\nUSA\t1\t0.01\t\t\tJan 02 2012\n")?;

    let err = convert_file_with_observer(profile, &in_path, &out_path, NoopObserver).unwrap_err();
    assert!(matches!(err, ConvertError::DataNotFound { .. }));
    assert!(!out_path.exists());
    Ok(())
}

#[test]
fn test_bad_row_aborts_without_partial_output() -> Result<()> {
    let dir = tempdir()?;
    let registry = ProviderRegistry::new();
    let profile = registry.lookup("tmobile")?;

    let in_path = dir.path().join("rates.csv");
    let out_path = dir.path().join("rates.out");
    fs::write(
        &in_path,
        "Destination,,Code,,,Price,Date,\nAustria,A,43,,,$0.03,01/15/2012,x\nBelgium,B,32,,,call us,01/15/2012,x\n",
    )?;

    let err = convert_file_with_observer(profile, &in_path, &out_path, NoopObserver).unwrap_err();
    match err {
        ConvertError::Extraction { line, row, .. } => {
            assert_eq!(line, 3);
            assert_eq!(row[0], "Belgium");
        }
        other => panic!("expected extraction error, got {}", other),
    }
    assert!(!out_path.exists());
    Ok(())
}

#[test]
fn test_missing_input_reports_path() -> Result<()> {
    let dir = tempdir()?;
    let registry = ProviderRegistry::new();
    let profile = registry.lookup("vodafone")?;
    let missing = dir.path().join("nope.csv");

    let err = convert_file(profile, &missing, &dir.path().join("out.csv")).unwrap_err();
    match err {
        ConvertError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("expected io error, got {}", other),
    }
    Ok(())
}
