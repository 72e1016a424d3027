//! Language selection and localized UI strings.
//!
//! Every user-visible string lives in one lookup table keyed by [`Language`]
//! so the two renditions stay in sync field by field.

use serde::{Deserialize, Serialize};

/// The closed set of supported conversation languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
}

impl Language {
    /// The other language of the pair.
    pub fn toggle(self) -> Self {
        match self {
            Language::English => Language::Spanish,
            Language::Spanish => Language::English,
        }
    }

    /// Two-letter code used by the translation API.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }

    /// Key under which the prompt record is stored.
    pub fn record_key(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Spanish => write!(f, "Español"),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "spanish" | "español" | "espanol" | "es" => Ok(Language::Spanish),
            _ => Err(format!("Unknown language: {s}")),
        }
    }
}

/// Localized labels and messages for the visitor-facing chat.
pub struct UiStrings {
    pub title: &'static str,
    pub intro: &'static str,
    pub chat_placeholder: &'static str,
    pub history_title: &'static str,
    pub lead_title: &'static str,
    pub name_label: &'static str,
    pub email_label: &'static str,
    pub phone_label: &'static str,
    pub submit_label: &'static str,
    pub lead_success: &'static str,
    pub lead_error: &'static str,
    pub completion_error: &'static str,
    pub limit_warning: &'static str,
    pub thinking: &'static str,
    pub disclaimer: &'static str,
}

static ENGLISH: UiStrings = UiStrings {
    title: "Solmar Estates AI Assistant",
    intro: "Welcome to the Solmar Estates AI team! Ask me anything about:\n\
            - Buying or selling a home\n\
            - Local neighborhoods (like Brickell, Homestead, or Kendall)\n\
            - Financing and investment options\n\
            - Scheduling a tour or speaking with an agent",
    chat_placeholder: "Ask me a question:",
    history_title: "Chat History",
    lead_title: "Want to speak to a Solmar Estates agent?",
    name_label: "Your Name",
    email_label: "Your Email",
    phone_label: "Phone Number (optional)",
    submit_label: "Send",
    lead_success: "Thanks! An agent will contact you soon.",
    lead_error: "There was an issue sending your message.",
    completion_error: "Sorry, something went wrong. Please try again.",
    limit_warning: "You've reached the maximum number of questions for this session.",
    thinking: "Thinking...",
    disclaimer: "This AI assistant provides general real estate information only. \
                 For professional advice, contact a Solmar Estates agent.",
};

static SPANISH: UiStrings = UiStrings {
    title: "Asistente de IA de Solmar Estates",
    intro: "¡Bienvenido al equipo de IA de Solmar Estates! Pregúntame sobre:\n\
            - Comprar o vender una propiedad\n\
            - Barrios locales (como Brickell, Homestead o Kendall)\n\
            - Opciones de financiamiento e inversión\n\
            - Programar un recorrido o hablar con un agente",
    chat_placeholder: "Hazme una pregunta:",
    history_title: "Historial de conversación",
    lead_title: "¿Quieres hablar con un agente de Solmar Estates?",
    name_label: "Tu nombre",
    email_label: "Tu correo electrónico",
    phone_label: "Número de teléfono (opcional)",
    submit_label: "Enviar",
    lead_success: "¡Gracias! Un agente se pondrá en contacto contigo pronto.",
    lead_error: "Hubo un problema al enviar tu mensaje.",
    completion_error: "Lo sentimos, algo salió mal. Inténtalo de nuevo.",
    limit_warning: "Has alcanzado el número máximo de preguntas para esta sesión.",
    thinking: "Pensando...",
    disclaimer: "Este asistente ofrece información general. \
                 Contacta a un agente de Solmar Estates para asesoría.",
};

/// Look up the UI string table for a language.
pub fn ui_strings(lang: Language) -> &'static UiStrings {
    match lang {
        Language::English => &ENGLISH,
        Language::Spanish => &SPANISH,
    }
}

/// Built-in system instruction, used when no stored prompt record is
/// available for the language.
pub fn default_system_prompt(lang: Language) -> &'static str {
    match lang {
        Language::English => {
            "You are Solmar Estates' virtual real estate assistant. Solmar Estates is a \
             full-service real estate firm based in Miami-Dade. If the user writes in \
             Spanish, respond in Spanish. Otherwise, reply in English. Be helpful and \
             professional.\n\
             If a user wants to speak with an agent, do not ask them for their contact \
             info directly. Instead, tell them to use the contact form to submit their \
             information so a Solmar Estates agent can reach out to them.\n\n\
             You help users with:\n\
             - Buying or selling property in Miami-Dade\n\
             - Renting, leasing, or investment strategies\n\
             - Home buying process, financing, and valuation\n\
             - Neighborhood info (Brickell, Homestead, Kendall)"
        }
        Language::Spanish => {
            "Eres el asistente virtual de bienes raíces de Solmar Estates. Solmar Estates \
             es una empresa de bienes raíces en Miami-Dade. Si el usuario escribe en \
             español, responde completamente en español. Sé profesional, claro y útil.\n\
             Si el usuario desea hablar con un agente, no le pidas directamente su \
             información de contacto. En su lugar, dile que complete el formulario de \
             contacto para que un agente de Solmar Estates pueda comunicarse con él.\n\n\
             Puedes ayudar con:\n\
             - Compra o venta de propiedades\n\
             - Estrategias de inversión o alquiler\n\
             - Proceso de compra, opciones de financiamiento y valoración\n\
             - Información de barrios como Brickell, Homestead, Kendall"
        }
    }
}
