use crate::calculations::calculator::{CalculationResult, ChamberType, DesignInput};
use crate::calculations::engine::try_calculate;
use crate::calculations::parameters::ChamberParameters;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum BatchProcessingError {
    #[error("File processing error: {0}")]
    FileProcessingError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

// Raw table row. Numbers stay text so a bad cell declines one case
// instead of failing the whole table.
#[derive(Debug, Deserialize)]
struct DesignCaseRow {
    case_id: String,
    chamber_type: String,
    flow_rate: String,
    #[serde(default)]
    variation_coefficient: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignCase {
    pub case_id: String,
    pub chamber_type: String,
    pub flow_rate: String,
    pub variation_coefficient: String,
}

impl From<DesignCaseRow> for DesignCase {
    fn from(row: DesignCaseRow) -> Self {
        DesignCase {
            case_id: row.case_id,
            chamber_type: row.chamber_type,
            flow_rate: row.flow_rate,
            variation_coefficient: row.variation_coefficient,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseOutcome {
    pub case_id: String,
    pub chamber_type: String,
    pub status: &'static str,
    pub length: Option<f64>,
    pub total_width: Option<f64>,
    pub total_depth: Option<f64>,
    pub effective_depth: Option<f64>,
    pub num_channels: Option<u32>,
    pub volume_grit: Option<f64>,
    pub air_supply: Option<f64>,
    pub diameter: Option<f64>,
    pub message: String,
}

impl CaseOutcome {
    fn sized(case_id: String, result: CalculationResult) -> Self {
        CaseOutcome {
            case_id,
            chamber_type: result.chamber_type.to_string(),
            status: "ok",
            length: Some(result.length),
            total_width: Some(result.total_width),
            total_depth: Some(result.total_depth),
            effective_depth: Some(result.effective_depth),
            num_channels: result.num_channels,
            volume_grit: result.volume_grit,
            air_supply: result.air_supply,
            diameter: result.diameter,
            message: String::new(),
        }
    }

    fn declined(case_id: String, chamber_type: String, message: String) -> Self {
        CaseOutcome {
            case_id,
            chamber_type,
            status: "declined",
            length: None,
            total_width: None,
            total_depth: None,
            effective_depth: None,
            num_channels: None,
            volume_grit: None,
            air_supply: None,
            diameter: None,
            message,
        }
    }

    pub fn is_sized(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub sized: usize,
    pub declined: usize,
}

/// Sizes a table of design cases against one set of chamber parameters.
pub struct BatchProcessor {
    parameters: ChamberParameters,
}

impl BatchProcessor {
    pub fn new(parameters: ChamberParameters) -> Self {
        BatchProcessor { parameters }
    }

    pub fn read_cases<R: Read>(reader: R) -> Result<Vec<DesignCase>, BatchProcessingError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut cases = Vec::new();
        for row in csv_reader.deserialize::<DesignCaseRow>() {
            cases.push(row?.into());
        }
        Ok(cases)
    }

    pub fn evaluate(&self, case: &DesignCase) -> CaseOutcome {
        let chamber_type = match case.chamber_type.parse::<ChamberType>() {
            Ok(chamber_type) => chamber_type,
            Err(e) => {
                return CaseOutcome::declined(
                    case.case_id.clone(),
                    case.chamber_type.clone(),
                    e.message().to_string(),
                )
            }
        };

        // Kz only feeds the horizontal grit volume; other chambers may
        // leave the column empty.
        let kz = match (chamber_type, case.variation_coefficient.is_empty()) {
            (ChamberType::Horizontal, _) | (_, false) => case.variation_coefficient.as_str(),
            (_, true) => "1",
        };

        let Some(input) = DesignInput::from_text(&case.flow_rate, kz, chamber_type) else {
            return CaseOutcome::declined(
                case.case_id.clone(),
                chamber_type.to_string(),
                "Design flow and variation coefficient must be positive numbers.".to_string(),
            );
        };

        match try_calculate(&input, &self.parameters.active(chamber_type)) {
            Ok(result) => CaseOutcome::sized(case.case_id.clone(), result),
            Err(e) => CaseOutcome::declined(
                case.case_id.clone(),
                chamber_type.to_string(),
                e.message().to_string(),
            ),
        }
    }

    pub fn process_cases(&self, cases: &[DesignCase]) -> Vec<CaseOutcome> {
        cases.par_iter().map(|case| self.evaluate(case)).collect()
    }

    pub fn write_outcomes<W: Write>(
        writer: W,
        outcomes: &[CaseOutcome],
    ) -> Result<(), BatchProcessingError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for outcome in outcomes {
            csv_writer.serialize(outcome)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn process_csv<R: Read, W: Write>(
        &self,
        reader: R,
        writer: W,
    ) -> Result<BatchSummary, BatchProcessingError> {
        let cases = Self::read_cases(reader)?;
        log::info!("Sizing {} design cases...", cases.len());

        let outcomes = self.process_cases(&cases);
        for outcome in outcomes.iter().filter(|o| !o.is_sized()) {
            log::warn!("Case {} declined: {}", outcome.case_id, outcome.message);
        }

        Self::write_outcomes(writer, &outcomes)?;

        let sized = outcomes.iter().filter(|o| o.is_sized()).count();
        let summary = BatchSummary {
            sized,
            declined: outcomes.len() - sized,
        };
        log::info!(
            "Batch sizing completed: {} sized, {} declined",
            summary.sized,
            summary.declined
        );
        Ok(summary)
    }

    pub fn process_file(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<BatchSummary, BatchProcessingError> {
        if !input_path.exists() {
            return Err(BatchProcessingError::FileProcessingError(format!(
                "Input file does not exist: {:?}",
                input_path
            )));
        }
        log::info!("Processing file: {:?}", input_path);

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let input = File::open(input_path)?;
        let output = File::create(output_path)?;
        let summary = self.process_csv(input, output)?;

        log::info!("Results written to: {:?}", output_path);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
case_id,chamber_type,flow_rate,variation_coefficient
H1,HORIZONTAL,0.2,1.5
A1,aerated,1.2,
V1,Vertical,0.2,1.5
X1,RADIAL,0.2,1.5
H2,HORIZONTAL,abc,1.5
H3,HORIZONTAL,0.2,
";

    fn processor() -> BatchProcessor {
        BatchProcessor::new(ChamberParameters::default())
    }

    #[test]
    fn reads_every_row() {
        let cases = BatchProcessor::read_cases(TABLE.as_bytes()).unwrap();
        assert_eq!(cases.len(), 6);
        assert_eq!(cases[1].variation_coefficient, "");
    }

    #[test]
    fn outcomes_keep_input_order() {
        let cases = BatchProcessor::read_cases(TABLE.as_bytes()).unwrap();
        let outcomes = processor().process_cases(&cases);
        let ids: Vec<&str> = outcomes.iter().map(|o| o.case_id.as_str()).collect();
        assert_eq!(ids, ["H1", "A1", "V1", "X1", "H2", "H3"]);

        assert_eq!(outcomes[0].total_depth, Some(1.7));
        assert_eq!(outcomes[0].num_channels, Some(2));
        assert_eq!(outcomes[1].air_supply, Some(864.0));
        assert_eq!(outcomes[2].diameter, Some(2.26));
        assert_eq!(outcomes[3].status, "declined");
        assert_eq!(outcomes[4].status, "declined");
        // Horizontal needs Kz for the grit volume.
        assert_eq!(outcomes[5].status, "declined");
    }

    #[test]
    fn process_csv_writes_result_table() {
        let mut output = Vec::new();
        let summary = processor().process_csv(TABLE.as_bytes(), &mut output).unwrap();
        assert_eq!(summary, BatchSummary { sized: 3, declined: 3 });

        let text = String::from_utf8(output).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "case_id,chamber_type,status,length,total_width,total_depth,effective_depth,num_channels,volume_grit,air_supply,diameter,message"
        );
        assert_eq!(
            lines.next().unwrap(),
            "H1,HORIZONTAL,ok,7.5,1.2,1.7,1.0,2,0.691,,,"
        );
        assert!(lines.nth(2).unwrap().starts_with("X1,RADIAL,declined,,,"));
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let table = "case_id,flow_rate\nH1,0.2\n";
        assert!(matches!(
            BatchProcessor::read_cases(table.as_bytes()),
            Err(BatchProcessingError::CsvError(_))
        ));
    }
}
