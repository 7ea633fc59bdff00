//! Medical analysis tasks offered to the host application

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Placeholder patient description used when the caller supplies none
pub const SAMPLE_PATIENT_TEXT: &str
  = "56-year-old male with persistent cough, fever of 101.2°F, shortness of breath, and fatigue. Medical history includes hypertension diagnosed in 2015 and Type 2 Diabetes diagnosed in 2018. Genetic test shows CYP2D6 - Intermediate metabolizer and SLCO1B1 - Reduced function. Currently taking Lisinopril 10mg daily and Metformin 500mg twice daily. Known allergies to Penicillin and Shellfish.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisTask
{   /// Structure a free-text patient report into categories
    PatientReport
  , /// Predict likely diseases with probabilities and risk factors
    DiseasePrediction
}

impl AnalysisTask
{   pub const ALL: [AnalysisTask; 2]
      = [AnalysisTask::PatientReport, AnalysisTask::DiseasePrediction];

    pub fn name(&self) -> &'static str
    {   match self
        {   AnalysisTask::PatientReport => "patient-report"
          , AnalysisTask::DiseasePrediction => "disease-prediction"
        }
    }

    pub fn system_message(&self) -> &'static str
    {   match self
        {   AnalysisTask::PatientReport =>
              "You are a medical AI assistant specialized in analyzing patient reports. Extract key information and organize it into structured data."
          , AnalysisTask::DiseasePrediction =>
              "You are a medical AI assistant specialized in disease prediction and analysis based on patient symptoms, medical history, and genetic markers. Provide a comprehensive analysis with high accuracy."
        }
    }

    fn instruction_prefix(&self) -> &'static str
    {   match self
        {   AnalysisTask::PatientReport =>
              "Analyze this patient report and extract key information into structured format with demographics, symptoms, medical history, genetic markers, current medications, and allergies categories."
          , AnalysisTask::DiseasePrediction =>
              "Based on these patient details, provide a disease prediction analysis with probability percentages, detection of genetic risk factors, and health recommendations. Format your response as a JSON object with these sections."
        }
    }

    /// User instruction for `patient_text`, or for the sample patient
    /// when the text is blank
    pub fn instruction(&self, patient_text: &str) -> String
    {   let patient = if patient_text.trim().is_empty()
        {   SAMPLE_PATIENT_TEXT
        } else
        {   patient_text
        };
        format!("{} {}", self.instruction_prefix(), patient)
    }

    /// Build a request; a system message set in `options` wins over the
    /// task's own.
    pub fn request(
      &self
    , patient_text: &str
    , options: &crate::request::RequestOptions
    ) -> crate::request::PromptRequest
    {   let mut options = options.clone();
        if options.system_message.is_none()
        {   options.system_message
              = Some(self.system_message().to_string());
        }
        crate::request::build(self.instruction(patient_text), &options)
    }

    /// Demo payload a host may show when analysis fails
    pub fn sample_result(&self) -> Option<Value>
    {   match self
        {   AnalysisTask::PatientReport => Some(json!({
              "demographics": {
                "age": 56,
                "gender": "Male",
                "ethnicity": "Caucasian"
              },
              "symptoms": [
                "Persistent cough",
                "Fever (101.2°F)",
                "Shortness of breath",
                "Fatigue"
              ],
              "medicalHistory": [
                "Hypertension (diagnosed 2015)",
                "Type 2 Diabetes (diagnosed 2018)"
              ],
              "geneticMarkers": [
                "CYP2D6 - Intermediate metabolizer",
                "SLCO1B1 - Reduced function"
              ],
              "currentMedications": [
                "Lisinopril 10mg daily",
                "Metformin 500mg twice daily"
              ],
              "allergies": [
                "Penicillin (severe rash)",
                "Shellfish"
              ]
            }))
          , AnalysisTask::DiseasePrediction => None
        }
    }

    /// Default file name for exported results
    pub fn export_file_name(&self) -> String
    {   format!("{}_results.json", self.name().replace('-', "_"))
    }

    /// Where to export results: the requested path, or the default file
    /// name in the working directory
    pub fn export_path(&self, requested: Option<PathBuf>) -> PathBuf
    {   requested.unwrap_or_else(|| PathBuf::from(self.export_file_name()))
    }
}

impl fmt::Display for AnalysisTask
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.write_str(self.name())
    }
}

impl FromStr for AnalysisTask
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   AnalysisTask::ALL.iter()
          .copied()
          .find(|task| task.name().eq_ignore_ascii_case(s.trim()))
          .ok_or_else(|| {
            crate::error::Error::InvalidConfiguration(
              format!("unknown analysis task: {}", s)
            )
          })
    }
}
