//! Plain-text technical report for a face design.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};
use tracing::info;

use crate::config::{Language, SiteInfo};
use crate::llm::prompts::rock_label;
use crate::session::FaceInputs;
use crate::types::PatternResult;

const RULE: &str = "-----------------------";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to create report directory {}: {}", .0.display(), .1)]
    CreateDir(PathBuf, std::io::Error),
    #[error("Failed to write report {}: {}", .0.display(), .1)]
    Write(PathBuf, std::io::Error),
}

struct Labels {
    title: &'static str,
    inputs: &'static str,
    width: &'static str,
    height: &'static str,
    advance: &'static str,
    rock: &'static str,
    operator: &'static str,
    results: &'static str,
    spacing: &'static str,
    burden: &'static str,
    holes: &'static str,
    mass: &'static str,
    costs: &'static str,
    dynamite: &'static str,
    detonator: &'static str,
    cord: &'static str,
    total: &'static str,
    analysis: &'static str,
    no_analysis: &'static str,
    generated_by: &'static str,
}

const LABELS_ES: Labels = Labels {
    title: "REPORTE TÉCNICO",
    inputs: "Datos de Entrada:",
    width: "Ancho",
    height: "Alto",
    advance: "Avance",
    rock: "Roca",
    operator: "Operador",
    results: "Resultados:",
    spacing: "Espaciamiento",
    burden: "Burden",
    holes: "Nro Taladros",
    mass: "Carga Explosiva Total",
    costs: "Desglose de Costos (Soles):",
    dynamite: "Dinamita",
    detonator: "Detonador",
    cord: "Cordón Detonante",
    total: "TOTAL OPERACIÓN",
    analysis: "Análisis IA:",
    no_analysis: "Análisis no generado.",
    generated_by: "Generado por",
};

const LABELS_EN: Labels = Labels {
    title: "TECHNICAL REPORT",
    inputs: "Input Data:",
    width: "Width",
    height: "Height",
    advance: "Advance",
    rock: "Rock",
    operator: "Operator",
    results: "Results:",
    spacing: "Spacing",
    burden: "Burden",
    holes: "Hole Count",
    mass: "Total Explosive Charge",
    costs: "Cost Breakdown (Soles):",
    dynamite: "Dynamite",
    detonator: "Detonator",
    cord: "Detonating Cord",
    total: "OPERATION TOTAL",
    analysis: "AI Analysis:",
    no_analysis: "Analysis not generated.",
    generated_by: "Generated by",
};

const fn labels(language: Language) -> &'static Labels {
    match language {
        Language::Es => &LABELS_ES,
        Language::En => &LABELS_EN,
    }
}

/// Render the face-design report.
///
/// The site name heads the title and signs the footer.
pub fn render_face_report(
    site: &SiteInfo,
    inputs: &FaceInputs,
    result: &PatternResult,
    analysis: Option<&str>,
    language: Language,
    generated_at: DateTime<Utc>,
) -> String {
    let l = labels(language);
    let analysis = analysis
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(l.no_analysis);

    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write!(
        out,
        "{title} {site}\n\
         {RULE}\n\
         {inputs_hdr}\n\
         - {width}: {w}m\n\
         - {height}: {h}m\n\
         - {advance}: {a}m\n\
         - {rock}: {rock_name}\n",
        title = l.title,
        site = site.name.to_uppercase(),
        inputs_hdr = l.inputs,
        width = l.width,
        w = inputs.width,
        height = l.height,
        h = inputs.height,
        advance = l.advance,
        a = inputs.advance,
        rock = l.rock,
        rock_name = rock_label(inputs.rock_class, language),
    );
    if !site.operator.is_empty() {
        let _ = writeln!(out, "- {}: {}", l.operator, site.operator);
    }

    let c = &result.costs;
    let _ = write!(
        out,
        "\n{results}\n\
         - {spacing}: {s}m\n\
         - {burden}: {b}m\n\
         - {holes}: {n}\n\
         - {mass}: {m:.2} kg\n\
         \n\
         {costs}\n\
         - {dynamite}: S/ {cd:.2}\n\
         - {detonator}: S/ {cdet:.2}\n\
         - {cord}: S/ {cc:.2}\n\
         {total}: S/ {ct:.2}\n\
         \n\
         {analysis_hdr}\n\
         {analysis}\n\
         {RULE}\n\
         {generated_by} {site_name} (c) {year}\n",
        results = l.results,
        spacing = l.spacing,
        s = result.spacing,
        burden = l.burden,
        b = result.burden,
        holes = l.holes,
        n = result.hole_count,
        mass = l.mass,
        m = result.total_explosive_mass,
        costs = l.costs,
        dynamite = l.dynamite,
        cd = c.dynamite,
        detonator = l.detonator,
        cdet = c.detonator,
        cord = l.cord,
        cc = c.cord,
        total = l.total,
        ct = c.total,
        analysis_hdr = l.analysis,
        generated_by = l.generated_by,
        site_name = site.name,
        year = generated_at.year(),
    );
    out
}

/// `Reporte_SubMine_<unix millis>.txt`
pub fn report_file_name(generated_at: DateTime<Utc>) -> String {
    format!("Reporte_SubMine_{}.txt", generated_at.timestamp_millis())
}

/// Write a rendered report into `dir`, creating it if needed.
pub fn write_report(
    dir: &Path,
    contents: &str,
    generated_at: DateTime<Utc>,
) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(dir).map_err(|e| ReportError::CreateDir(dir.to_path_buf(), e))?;
    let path = dir.join(report_file_name(generated_at));
    std::fs::write(&path, contents).map_err(|e| ReportError::Write(path.clone(), e))?;
    info!(path = %path.display(), bytes = contents.len(), "Report written");
    Ok(path)
}
