mod settings;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware, web};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use pwdgen_core::{Configuration, Error, PasswordEngine, Strategy, ThreadSource, WordSource, parse_length};
use settings::{SETTINGS_FILE, Settings};

/// Query parameters of the `/v1/generate` endpoint.
///
/// Every policy field overrides the server configuration for this request
/// only. Values are taken as text and validated by the engine.
#[derive(Deserialize, Default)]
struct GenerateParams {
	strategy: Option<String>,
	length: Option<String>,
	language: Option<String>,
	min_length: Option<String>,
	num_digits: Option<String>,
	num_punctuation_symbols: Option<String>,
	punctuation: Option<String>, // whitespace-separated symbols
	capitalize_words: Option<String>,
}

impl GenerateParams {
	/// Policy overrides as (property name, value) pairs.
	fn overrides(&self) -> impl Iterator<Item = (&'static str, &str)> {
		[
			("language", &self.language),
			("min_length", &self.min_length),
			("num_digits", &self.num_digits),
			("num_punctuation_symbols", &self.num_punctuation_symbols),
			("punctuation_alphabet", &self.punctuation),
			("capitalize_words", &self.capitalize_words),
		]
		.into_iter()
		.filter_map(|(name, value)| value.as_deref().map(|value| (name, value)))
	}
}

/// State shared by all workers.
struct AppState {
	/// Base policy; every request works on its own copy.
	config: Configuration,
	/// Shared word lists, cached across requests.
	words: WordSource,
	languages: Vec<String>,
	num_characters_in_random_string: usize,
}

impl AppState {
	/// Engine for a single request: own configuration and random source,
	/// shared word-list cache.
	fn engine(&self) -> PasswordEngine<ThreadSource> {
		PasswordEngine::with_source(self.words.clone(), ThreadSource::default()).with_config(self.config.clone())
	}
}

fn error_response(e: Error) -> HttpResponse {
	if e.is_client_error() {
		HttpResponse::BadRequest().body(e.to_string())
	} else {
		tracing::error!(error = %e, "password generation failed");
		HttpResponse::InternalServerError().body(e.to_string())
	}
}

fn generate_one(state: &AppState, params: &GenerateParams) -> pwdgen_core::Result<String> {
	let mut engine = state.engine();
	for (name, value) in params.overrides() {
		engine.configure(name, value)?;
	}
	let strategy = match &params.strategy {
		Some(s) => s.parse()?,
		None => Strategy::Words,
	};
	let length = params.length.as_deref().map(parse_length).transpose()?;
	engine.generate(strategy, length)
}

fn generate_listing(state: &AppState) -> pwdgen_core::Result<Vec<String>> {
	let mut engine = state.engine();
	let mut passwords = Vec::with_capacity(state.languages.len() + 2);
	for language in &state.languages {
		engine.set_language(language)?;
		passwords.push(engine.generate_word_password()?);
	}
	passwords.push(engine.generate_nonsense_password()?);
	passwords.push(engine.generate_random(Some(state.num_characters_in_random_string))?);
	Ok(passwords)
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a single password. `strategy` is `words` (default), `nonsense`
/// or `random`; `length` is the body length of random passwords. `length`
/// and the counts are capped at `pwdgen_core::MAX_COUNT`; larger values get
/// a 400.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<AppState>, query: web::Query<GenerateParams>) -> impl Responder {
	match generate_one(&data, &query) {
		Ok(password) => HttpResponse::Ok().body(password),
		Err(e) => error_response(e),
	}
}

/// HTTP GET endpoint `/v1/passwords`
///
/// One word password per configured language, then a nonsense password and
/// a random password, one per line.
#[get("/v1/passwords")]
async fn get_passwords(data: web::Data<AppState>) -> impl Responder {
	match generate_listing(&data) {
		Ok(passwords) => HttpResponse::Ok().body(passwords.join("\n")),
		Err(e) => error_response(e),
	}
}

#[get("/v1/languages")]
async fn get_languages(data: web::Data<AppState>) -> impl Responder {
	match data.words.languages() {
		Ok(languages) => HttpResponse::Ok().body(languages.join("\n")),
		Err(e) => error_response(e),
	}
}

fn app_state(settings: Settings) -> std::io::Result<AppState> {
	let words = WordSource::new(&settings.words_dir);
	let config = settings
		.configuration(&words)
		.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
	Ok(AppState {
		config,
		words,
		languages: settings.languages,
		num_characters_in_random_string: settings.num_characters_in_random_string,
	})
}

/// Main entry point for the server.
///
/// Reads `pwdgen.toml` from the working directory (defaults if absent),
/// checks the configured word lists, and serves the password endpoints.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let settings = Settings::load(SETTINGS_FILE)?;
	let address = (settings.bind.clone(), settings.port);
	let state = web::Data::new(app_state(settings)?);
	tracing::info!(host = %address.0, port = address.1, "starting password server");

	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET"]))
			.app_data(state.clone())
			.service(get_generated)
			.service(get_passwords)
			.service(get_languages)
	})
		.bind(address)?
		.run()
		.await
}
