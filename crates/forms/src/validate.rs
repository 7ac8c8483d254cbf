//! Field and form validation for the registration page.
//!
//! Pattern checks match the masked formats produced by [`crate::mask`]; CPF
//! additionally verifies the check digits. Messages live in a serde-loadable
//! table so the site can reword them without touching code.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid regex"));
static TELEFONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\(\d{2}\) \d{4,5}-\d{4}$").expect("invalid regex"));
static CEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{5}-\d{3}$").expect("invalid regex"));

/// Minimum age accepted on the registration form.
pub const MIN_AGE_YEARS: u32 = 18;

/// Validate a CPF, masked or bare.
///
/// Checks length, rejects the repeated-digit sequences the registry never
/// issues, and verifies both check digits.
pub fn validar_cpf(input: &str) -> bool {
    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9], 10) == digits[9] && check_digit(&digits[..10], 11) == digits[10]
}

fn check_digit(digits: &[u32], start_weight: u32) -> u32 {
    let sum: u32 = digits.iter().enumerate().map(|(i, &d)| d * (start_weight - i as u32)).sum();
    let rest = (sum * 10) % 11;
    if rest >= 10 { 0 } else { rest }
}

pub fn validar_email(input: &str) -> bool {
    EMAIL.is_match(input)
}

pub fn validar_telefone(input: &str) -> bool {
    TELEFONE.is_match(input)
}

pub fn validar_cep(input: &str) -> bool {
    CEP.is_match(input)
}

/// Whether someone born on `nascimento` has reached `MIN_AGE_YEARS` by `hoje`.
pub fn validar_idade(nascimento: NaiveDate, hoje: NaiveDate) -> bool {
    match hoje.years_since(nascimento) {
        Some(anos) => anos >= MIN_AGE_YEARS,
        None => false, // birth date in the future
    }
}

/// Validation messages, reword-able via configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationMessages {
    #[serde(default = "msg_required")]
    pub required: String,
    #[serde(default = "msg_email")]
    pub email: String,
    #[serde(default = "msg_cpf")]
    pub cpf: String,
    #[serde(default = "msg_telefone")]
    pub telefone: String,
    #[serde(default = "msg_cep")]
    pub cep: String,
    #[serde(default = "msg_min_length")]
    pub min_length: String,
    #[serde(default = "msg_max_length")]
    pub max_length: String,
    #[serde(default = "msg_age")]
    pub age: String,
    #[serde(default = "msg_date")]
    pub date: String,
}

fn msg_required() -> String {
    "Este campo é obrigatório".into()
}
fn msg_email() -> String {
    "Digite um e-mail válido".into()
}
fn msg_cpf() -> String {
    "CPF inválido".into()
}
fn msg_telefone() -> String {
    "Telefone inválido".into()
}
fn msg_cep() -> String {
    "CEP inválido".into()
}
fn msg_min_length() -> String {
    "Mínimo de {min} caracteres".into()
}
fn msg_max_length() -> String {
    "Máximo de {max} caracteres".into()
}
fn msg_age() -> String {
    "Você deve ter pelo menos 18 anos".into()
}
fn msg_date() -> String {
    "Data inválida".into()
}

impl Default for ValidationMessages {
    fn default() -> Self {
        Self {
            required: msg_required(),
            email: msg_email(),
            cpf: msg_cpf(),
            telefone: msg_telefone(),
            cep: msg_cep(),
            min_length: msg_min_length(),
            max_length: msg_max_length(),
            age: msg_age(),
            date: msg_date(),
        }
    }
}

/// Which rule applies to a field, derived from the field's id the same way
/// the registration page wires its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Email,
    Cpf,
    Telefone,
    Cep,
    DataNascimento,
    Nome,
    None,
}

impl FieldRule {
    pub fn for_id(id: &str) -> Self {
        match id {
            "email" => Self::Email,
            "cpf" => Self::Cpf,
            "telefone" | "celular" => Self::Telefone,
            "cep" => Self::Cep,
            "dataNascimento" => Self::DataNascimento,
            "nome" => Self::Nome,
            _ => Self::None,
        }
    }
}

/// One form field's submitted state.
#[derive(Debug, Clone)]
pub struct FieldInput {
    pub id: String,
    pub value: String,
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
}

impl FieldInput {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self { id: id.into(), value: value.into(), required: false, min_len: None, max_len: None }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_len(mut self, len: usize) -> Self {
        self.min_len = Some(len);
        self
    }

    pub fn max_len(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }
}

/// A validation failure tied to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Validate one field. `hoje` anchors the age check.
pub fn validar_campo(field: &FieldInput, messages: &ValidationMessages, hoje: NaiveDate) -> Result<(), FieldError> {
    let value = field.value.trim();
    let fail = |message: String| Err(FieldError { field: field.id.clone(), message });

    if value.is_empty() {
        if field.required {
            return fail(messages.required.clone());
        }
        return Ok(()); // optional and empty: nothing to check
    }

    match FieldRule::for_id(&field.id) {
        FieldRule::Email => {
            if !validar_email(value) {
                return fail(messages.email.clone());
            }
        }
        FieldRule::Cpf => {
            if !validar_cpf(value) {
                return fail(messages.cpf.clone());
            }
        }
        FieldRule::Telefone => {
            if !validar_telefone(value) {
                return fail(messages.telefone.clone());
            }
        }
        FieldRule::Cep => {
            if !validar_cep(value) {
                return fail(messages.cep.clone());
            }
        }
        FieldRule::DataNascimento => {
            let Ok(nascimento) = NaiveDate::parse_from_str(value, "%d/%m/%Y") else {
                return fail(messages.date.clone());
            };
            if !validar_idade(nascimento, hoje) {
                return fail(messages.age.clone());
            }
        }
        FieldRule::Nome => {
            if value.chars().count() < 3 {
                return fail(messages.min_length.replace("{min}", "3"));
            }
        }
        FieldRule::None => {}
    }

    if let Some(min) = field.min_len
        && value.chars().count() < min
    {
        return fail(messages.min_length.replace("{min}", &min.to_string()));
    }
    if let Some(max) = field.max_len
        && value.chars().count() > max
    {
        return fail(messages.max_length.replace("{max}", &max.to_string()));
    }

    Ok(())
}

/// Validate a whole form, collecting every failure.
pub fn validar_formulario(fields: &[FieldInput], messages: &ValidationMessages, hoje: NaiveDate) -> Vec<FieldError> {
    fields
        .iter()
        .filter_map(|field| validar_campo(field, messages, hoje).err())
        .collect()
}
