use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use log::info;

use serde::Deserialize;
use rs_dummy_core::{Definition, DefinitionMap, Dummy, Error, LocalizedDefinitions};

/// Query parameters for the `/v1/resolve` endpoint
#[derive(Deserialize)]
struct ResolveParams {
	template: String,
	seed: Option<u64>,
	locales: Option<String> // comma separated, highest priority first
}

#[derive(Deserialize)]
struct LocaleQuery {
	locale: Option<String>
}

/// Dictionaries loaded so far, by locale.
///
/// Each request builds its own `Dummy` (and so its own random stream);
/// only the read-only dictionaries are shared.
struct SharedData {
	definitions: HashMap<String, Arc<dyn LocalizedDefinitions>>
}

impl ResolveParams {
	/// Splits the `locales` parameter, ignoring blank entries.
	fn locales(&self) -> Vec<String> {
		match &self.locales {
			None => Vec::new(),
			Some(s) => s
				.split(',')
				.map(|l| l.trim())
				.filter(|l| !l.is_empty())
				.map(str::to_owned)
				.collect(),
		}
	}
}

/// HTTP GET endpoint `/v1/resolve`
///
/// Resolves `template` with a fresh seeded `Dummy`.
/// The seed actually used is returned in the `X-Dummy-Seed` header so the
/// same output can be requested again.
#[get("/v1/resolve")]
async fn get_resolved(data: web::Data<Mutex<SharedData>>, query: web::Query<ResolveParams>) -> impl Responder {
	let provider: Vec<Arc<dyn LocalizedDefinitions>> = match data.lock() {
		Ok(shared_data) => shared_data.definitions.values().cloned().collect(),
		Err(_) => return HttpResponse::InternalServerError().body("Definitions lock failed"),
	};

	let mut builder = Dummy::builder().locale(query.locales());
	if let Some(seed) = query.seed {
		builder = builder.seed(seed);
	}

	let mut dummy = match builder.build(&provider) {
		Ok(d) => d,
		Err(e @ (Error::MissingLocale(_) | Error::DuplicateLocale(_))) => {
			return HttpResponse::BadRequest().body(e.to_string());
		}
		Err(e) => return HttpResponse::InternalServerError().body(e.to_string()),
	};

	let result = dummy.expression(&query.template);
	HttpResponse::Ok()
		.insert_header(("X-Dummy-Seed", dummy.seed().to_string()))
		.body(result)
}

#[get("/v1/locales")]
async fn get_locales(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Definitions lock failed"),
	};
	let mut locales: Vec<&str> = shared_data.definitions.keys().map(String::as_str).collect();
	locales.sort_unstable();
	HttpResponse::Ok().body(locales.join("\n"))
}

/// HTTP PUT endpoint `/v1/definitions?locale=xx`
///
/// Replaces the dictionary of a locale with the JSON tree in the body.
#[put("/v1/definitions")]
async fn put_definitions(
	data: web::Data<Mutex<SharedData>>,
	query: web::Query<LocaleQuery>,
	body: web::Json<BTreeMap<String, Definition>>,
) -> impl Responder {
	let locale = match &query.locale {
		Some(s) if !s.trim().is_empty() => s.trim().to_owned(),
		_ => return HttpResponse::BadRequest().body("Missing or empty locale"),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Definitions lock failed"),
	};

	let definitions = DefinitionMap::new(&locale, body.into_inner()).shared();
	shared_data.definitions.insert(locale.clone(), definitions);
	info!("Definitions loaded for locale {locale}");

	HttpResponse::Ok().body("Definitions loaded successfully")
}

/// Main entry point for the server.
///
/// Starts with no dictionaries; load them through `PUT /v1/definitions`.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Log level comes from `RUST_LOG`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let shared_data = SharedData {
		definitions: HashMap::new(),
	};
	let shared_definitions = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_definitions.clone())
			.service(get_resolved)
			.service(get_locales)
			.service(put_definitions)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::{test, App};

	fn app_data() -> web::Data<Mutex<SharedData>> {
		web::Data::new(Mutex::new(SharedData { definitions: HashMap::new() }))
	}

	#[actix_web::test]
	async fn resolves_against_uploaded_definitions() {
		let app = test::init_service(
			App::new()
				.app_data(app_data())
				.service(get_resolved)
				.service(get_locales)
				.service(put_definitions),
		)
		.await;

		let upload = test::TestRequest::put()
			.uri("/v1/definitions?locale=en")
			.set_json(color_definitions())
			.to_request();
		assert!(test::call_service(&app, upload).await.status().is_success());

		let request = test::TestRequest::get()
			.uri("/v1/resolve?template=%23%7Bcolor%7D&seed=4&locales=en")
			.to_request();
		let response = test::call_service(&app, request).await;
		assert!(response.status().is_success());
		assert_eq!(response.headers().get("X-Dummy-Seed").unwrap(), "4");
		let body = test::read_body(response).await;
		assert_eq!(body, "red");

		let locales = test::call_and_read_body(&app, test::TestRequest::get().uri("/v1/locales").to_request()).await;
		assert_eq!(locales, "en");
	}

	#[actix_web::test]
	async fn unknown_locale_is_a_bad_request() {
		let app = test::init_service(App::new().app_data(app_data()).service(get_resolved)).await;
		let request = test::TestRequest::get()
			.uri("/v1/resolve?template=x&locales=de")
			.to_request();
		assert_eq!(test::call_service(&app, request).await.status(), 400);
	}

	fn color_definitions() -> BTreeMap<String, Definition> {
		BTreeMap::from([("color".to_owned(), Definition::from(vec!["red"]))])
	}
}
