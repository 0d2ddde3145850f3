//! Prompt templates, the assistant persona, and apology strings.
//!
//! Spanish is the production language; English is kept in lockstep.

use crate::config::Language;
use crate::types::{FaceGeometry, PatternResult, RockClass};

/// Technical-analysis prompt, Spanish.
const ANALYSIS_PROMPT_ES: &str = "Como experto senior en ingeniería de minas especializado en perforación y voladura subterránea, analiza los siguientes parámetros:
- Ancho de frente: {width}m
- Alto de frente: {height}m
- Avance: {advance}m
- Tipo de roca: {rock}

Resultados calculados:
- Espaciamiento: {spacing}m
- Burden: {burden}m
- Nro Taladros: {holes}
- Carga Explosiva: {mass}kg
- Costo Total: S/ {total}

Proporciona un análisis profesional detallado en tres secciones:
1. Optimización Técnica (malla, reducción de sobreperforación, etc.)
2. Impacto Ambiental (gases, vibraciones)
3. Seguridad (distancia, ventilación)

Usa un lenguaje técnico riguroso.";

/// Technical-analysis prompt, English.
const ANALYSIS_PROMPT_EN: &str = "As a senior mining engineer specialised in underground drilling and blasting, analyse the following parameters:
- Face width: {width}m
- Face height: {height}m
- Advance: {advance}m
- Rock type: {rock}

Calculated results:
- Spacing: {spacing}m
- Burden: {burden}m
- Hole count: {holes}
- Explosive charge: {mass}kg
- Total cost: S/ {total}

Provide a detailed professional analysis in three sections:
1. Technical Optimisation (pattern, overbreak reduction, etc.)
2. Environmental Impact (fumes, vibration)
3. Safety (stand-off distance, ventilation)

Use rigorous technical language.";

const PERSONA_ES: &str = "Eres SubMine AI, un asistente experto en minería subterránea. Proporcionas respuestas técnicas, precisas y seguras sobre perforación, voladura, geomecánica y normativas mineras.";

const PERSONA_EN: &str = "You are SubMine AI, an expert assistant for underground mining. You give technical, precise and safe answers about drilling, blasting, geomechanics and mining regulations.";

/// System persona for the chat assistant.
pub const fn assistant_persona(language: Language) -> &'static str {
    match language {
        Language::Es => PERSONA_ES,
        Language::En => PERSONA_EN,
    }
}

/// Returned when the analysis call fails.
pub const fn analysis_apology(language: Language) -> &'static str {
    match language {
        Language::Es => "Error al generar el análisis técnico. Por favor, intente de nuevo.",
        Language::En => "Error generating the technical analysis. Please try again.",
    }
}

/// Returned when the chat call fails.
pub const fn chat_apology(language: Language) -> &'static str {
    match language {
        Language::Es => "Lo siento, hubo un problema con mi sistema de procesamiento minero.",
        Language::En => "Sorry, there was a problem with my mining processing system.",
    }
}

/// Rock label as the model should read it.
pub const fn rock_label(rock: RockClass, language: Language) -> &'static str {
    match language {
        Language::Es => rock.label_es(),
        Language::En => rock.display_name(),
    }
}

/// Interpolate face inputs and computed pattern into the analysis prompt.
pub fn analysis_prompt(
    face: &FaceGeometry,
    rock: RockClass,
    pattern: &PatternResult,
    language: Language,
) -> String {
    let template = match language {
        Language::Es => ANALYSIS_PROMPT_ES,
        Language::En => ANALYSIS_PROMPT_EN,
    };

    template
        .replace("{width}", &face.width.to_string())
        .replace("{height}", &face.height.to_string())
        .replace("{advance}", &face.advance.to_string())
        .replace("{rock}", rock_label(rock, language))
        .replace("{spacing}", &pattern.spacing.to_string())
        .replace("{burden}", &pattern.burden.to_string())
        .replace("{holes}", &pattern.hole_count.to_string())
        .replace("{mass}", &format!("{:.2}", pattern.total_explosive_mass))
        .replace("{total}", &format!("{:.2}", pattern.costs.total))
}
