//! Pruebas de extremo a extremo sobre el router, sin red: cada petición se
//! despacha con `tower::ServiceExt::oneshot` contra una base en memoria.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use mano_abiertas::{app, config::Config, db, state::State};

const ADMIN_EMAIL: &str = "admin@manoabiertas.org";
const ADMIN_PASSWORD: &str = "secreta123";

fn estado() -> Arc<State> {
    let config = Config {
        port: 0,
        db_path: ":memory:".into(),
        admin_email: ADMIN_EMAIL.into(),
        admin_password: ADMIN_PASSWORD.into(),
    };
    let conn = db::abrir_en_memoria().expect("base en memoria");
    State::con_conexion(config, conn)
}

async fn enviar(state: &Arc<State>, peticion: Request<Body>) -> Response {
    app(state.clone()).oneshot(peticion).await.unwrap()
}

async fn cuerpo_json(respuesta: Response) -> Value {
    let bytes = respuesta.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, token: Option<&str>, cuerpo: &Value) -> Request<Body> {
    con_json(Request::post(uri), token, cuerpo)
}

fn put_json(uri: &str, token: Option<&str>, cuerpo: &Value) -> Request<Body> {
    con_json(Request::put(uri), token, cuerpo)
}

fn con_json(
    mut builder: axum::http::request::Builder,
    token: Option<&str>,
    cuerpo: &Value,
) -> Request<Body> {
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(cuerpo.to_string()))
        .unwrap()
}

fn post_vacio(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn iniciar_sesion(state: &Arc<State>) -> String {
    let respuesta = enviar(
        state,
        post_json(
            "/login",
            None,
            &json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(respuesta.status(), StatusCode::OK);

    cuerpo_json(respuesta).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

fn lugar_de_prueba(nombre: &str, tipo: &str) -> Value {
    json!({
        "tipoRecurso": tipo,
        "nombreLugar": nombre,
        "direccionLugar": "Av. Rivadavia 1234",
        "provincia": "Ciudad Autónoma de Buenos Aires",
        "barrio": "Balvanera",
        "horarios": "Lunes a viernes de 12 a 14",
        "aQuienAyuda": { "todos": true },
        "fuente": "Relevamiento propio",
        "fechaVerificacion": "2024-05-20"
    })
}

#[tokio::test]
async fn listado_publico_arranca_vacio() {
    let state = estado();

    let respuesta = enviar(&state, get("/lugares")).await;
    assert_eq!(respuesta.status(), StatusCode::OK);
    assert_eq!(cuerpo_json(respuesta).await, json!([]));
}

#[tokio::test]
async fn el_abm_exige_sesion() {
    let state = estado();

    let respuesta = enviar(
        &state,
        post_json("/lugares", None, &lugar_de_prueba("Comedor", "Comida")),
    )
    .await;
    assert_eq!(respuesta.status(), StatusCode::UNAUTHORIZED);

    let respuesta = enviar(
        &state,
        post_json(
            "/lugares",
            Some("token-falso"),
            &lugar_de_prueba("Comedor", "Comida"),
        ),
    )
    .await;
    assert_eq!(respuesta.status(), StatusCode::UNAUTHORIZED);

    // los inactivos tampoco se listan sin sesión
    let respuesta = enviar(&state, get("/lugares?includeInactive=true")).await;
    assert_eq!(respuesta.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_con_contrasena_incorrecta() {
    let state = estado();

    let respuesta = enviar(
        &state,
        post_json(
            "/login",
            None,
            &json!({ "email": ADMIN_EMAIL, "password": "incorrecta" }),
        ),
    )
    .await;
    assert_eq!(respuesta.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        cuerpo_json(respuesta).await["mensaje"],
        "Contraseña incorrecta."
    );
}

#[tokio::test]
async fn alta_invalida_devuelve_el_mapa_de_errores() {
    let state = estado();
    let token = iniciar_sesion(&state).await;

    let mut lugar = lugar_de_prueba("Comedor", "Comida");
    lugar["tipoRecurso"] = json!("");
    lugar["barrio"] = json!("");

    let respuesta = enviar(&state, post_json("/lugares", Some(&token), &lugar)).await;
    assert_eq!(respuesta.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let errores = &cuerpo_json(respuesta).await["errores"];
    assert_eq!(errores["tipoRecurso"], "El tipo de recurso es obligatorio");
    assert_eq!(
        errores["barrio"],
        "El barrio/partido es obligatorio para esta provincia"
    );
}

#[tokio::test]
async fn alta_filtrado_y_ciclo_de_activacion() {
    let state = estado();
    let token = iniciar_sesion(&state).await;

    let respuesta = enviar(
        &state,
        post_json(
            "/lugares",
            Some(&token),
            &lugar_de_prueba("Comedor Centro", "Comida"),
        ),
    )
    .await;
    assert_eq!(respuesta.status(), StatusCode::CREATED);
    let creado = cuerpo_json(respuesta).await;
    let id = creado["id"].as_str().unwrap().to_string();
    assert_eq!(creado["activo"], json!(true));

    enviar(
        &state,
        post_json(
            "/lugares",
            Some(&token),
            &lugar_de_prueba("Ropero Norte", "Ropa"),
        ),
    )
    .await;

    // filtro por tipo de recurso
    let respuesta = enviar(&state, get("/lugares?tipoRecurso=Comida")).await;
    let lista = cuerpo_json(respuesta).await;
    assert_eq!(lista.as_array().unwrap().len(), 1);
    assert_eq!(lista[0]["nombreLugar"], "Comedor Centro");

    // desactivar lo saca del listado público
    let respuesta = enviar(
        &state,
        post_vacio(&format!("/lugares/{id}/desactivar"), Some(&token)),
    )
    .await;
    assert_eq!(respuesta.status(), StatusCode::NO_CONTENT);

    let respuesta = enviar(&state, get("/lugares?tipoRecurso=Comida")).await;
    assert_eq!(cuerpo_json(respuesta).await, json!([]));

    // pero sigue visible para la administración
    let respuesta = enviar(
        &state,
        Request::get("/lugares?includeInactive=true")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    let lista = cuerpo_json(respuesta).await;
    assert_eq!(lista.as_array().unwrap().len(), 2);

    // reactivar lo devuelve al listado público
    let respuesta = enviar(
        &state,
        post_vacio(&format!("/lugares/{id}/activar"), Some(&token)),
    )
    .await;
    assert_eq!(respuesta.status(), StatusCode::NO_CONTENT);

    let respuesta = enviar(&state, get("/lugares?tipoRecurso=Comida")).await;
    assert_eq!(cuerpo_json(respuesta).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn actualizacion_y_baja_fisica_de_lugar() {
    let state = estado();
    let token = iniciar_sesion(&state).await;

    let respuesta = enviar(
        &state,
        post_json(
            "/lugares",
            Some(&token),
            &lugar_de_prueba("Comedor", "Comida"),
        ),
    )
    .await;
    let id = cuerpo_json(respuesta).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let mut cambio = lugar_de_prueba("Comedor renombrado", "Comida");
    cambio["informacionAdicional"] = json!("Traer recipiente");
    let respuesta = enviar(
        &state,
        put_json(&format!("/lugares/{id}"), Some(&token), &cambio),
    )
    .await;
    assert_eq!(respuesta.status(), StatusCode::OK);
    assert_eq!(
        cuerpo_json(respuesta).await["nombreLugar"],
        "Comedor renombrado"
    );

    let respuesta = enviar(
        &state,
        Request::delete(format!("/lugares/{id}"))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(respuesta.status(), StatusCode::NO_CONTENT);

    let respuesta = enviar(&state, get(&format!("/lugares/{id}"))).await;
    assert_eq!(respuesta.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tramites_sin_baja_fisica() {
    let state = estado();
    let token = iniciar_sesion(&state).await;

    let respuesta = enviar(
        &state,
        post_json(
            "/tramites",
            Some(&token),
            &json!({
                "titulo": "Renovación de DNI",
                "categoria": "Documentación",
                "descripcion": "Cómo renovar el DNI en RENAPER",
                "fuente": "argentina.gob.ar"
            }),
        ),
    )
    .await;
    assert_eq!(respuesta.status(), StatusCode::CREATED);
    let id = cuerpo_json(respuesta).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    // "Documentación" percent-codificada
    let respuesta = enviar(&state, get("/tramites?categoria=Documentaci%C3%B3n")).await;
    assert_eq!(cuerpo_json(respuesta).await.as_array().unwrap().len(), 1);

    // no existe la baja física de trámites
    let respuesta = enviar(
        &state,
        Request::delete(format!("/tramites/{id}"))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(respuesta.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn los_errores_responden_json() {
    let state = estado();

    let respuesta = enviar(&state, get("/lugares/no-existe")).await;
    assert_eq!(respuesta.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        cuerpo_json(respuesta).await["mensaje"],
        "Registro no encontrado"
    );

    let respuesta = enviar(
        &state,
        post_json("/lugares", None, &lugar_de_prueba("Comedor", "Comida")),
    )
    .await;
    assert_eq!(respuesta.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(cuerpo_json(respuesta).await["mensaje"], "Sesión requerida");
}

#[tokio::test]
async fn sesion_actual_y_logout() {
    let state = estado();

    let respuesta = enviar(&state, get("/session")).await;
    assert_eq!(cuerpo_json(respuesta).await, json!(null));

    let token = iniciar_sesion(&state).await;

    let respuesta = enviar(
        &state,
        Request::get("/session")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(cuerpo_json(respuesta).await["email"], ADMIN_EMAIL);

    let respuesta = enviar(&state, post_vacio("/logout", Some(&token))).await;
    assert_eq!(respuesta.status(), StatusCode::NO_CONTENT);

    let respuesta = enviar(
        &state,
        Request::get("/session")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(cuerpo_json(respuesta).await, json!(null));
}
