use std::cell::OnceCell;
use std::rc::{Rc, Weak};

use navrouter::middleware::{catch_handler, handler, middleware};
use navrouter::router::{RouteSpec, Router};
use navrouter::runtime_config::RouterConfig;
use navrouter::{RouterError, State};
use serde_json::{json, Value};

mod common;
use common::{Recorder, Trail};
use tracing_util::TestTracing;

/// Route whose handler sends its name, route, path and params.
fn echo(router: &mut Router, name: &'static str, pattern: &str) {
    router
        .get(RouteSpec::new(
            pattern,
            handler(move |req, res, _next| {
                res.send(json!({
                    "name": name,
                    "base": req.base,
                    "route": req.route,
                    "path": req.path,
                    "params": req.params_map(),
                }));
            }),
        ))
        .unwrap();
}

fn catch_echo(router: &mut Router, name: &'static str, pattern: &str) {
    router
        .catch(RouteSpec::new(
            pattern,
            catch_handler(move |req, res, error| {
                res.send(json!({
                    "catch": name,
                    "path": req.path,
                    "params": req.params_map(),
                    "error": error.cloned(),
                }));
            }),
        ))
        .unwrap();
}

#[test]
fn test_params_are_extracted() {
    let mut router = Router::new();
    echo(&mut router, "user", "/users/:id");
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/users/42", None);
    router.execute("/users/42/", None);

    let values = recorder.values();
    assert_eq!(values.len(), 2);
    for value in &values {
        assert_eq!(value["name"], "user");
        assert_eq!(value["params"], json!({ "id": "42" }));
        assert_eq!(value["route"], "/users/:id");
        assert_eq!(value["base"], "/");
    }
    assert_eq!(values[1]["path"], "/users/42/");
}

#[test]
fn test_multiple_params_and_base() {
    let mut router = Router::with_config(RouterConfig::default().with_base("shop"));
    echo(&mut router, "item", "/:category/items/:sku");
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/shop/tools/items/H-12", None);
    router.execute("/tools/items/H-12", None);

    let values = recorder.values();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["base"], "/shop");
    assert_eq!(values[0]["route"], "/shop/:category/items/:sku");
    assert_eq!(values[0]["params"], json!({ "category": "tools", "sku": "H-12" }));
}

#[test]
fn test_bound_pattern_falls_through() {
    let mut router = Router::new();
    echo(&mut router, "numeric", r"/users/:id->\d+");
    echo(&mut router, "slug", "/users/:slug");
    catch_echo(&mut router, "missing", "*");
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/users/42", None);
    router.execute("/users/abc", None);

    let values = recorder.values();
    assert_eq!(values[0]["name"], "numeric");
    assert_eq!(values[1]["name"], "slug");
    assert_eq!(values[1]["params"]["slug"], "abc");
}

#[test]
fn test_bound_pattern_without_alternative_reaches_catch() {
    let mut router = Router::new();
    echo(&mut router, "numeric", r"/users/:id->\d+");
    catch_echo(&mut router, "missing", "*");
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/users/abc", None);

    let values = recorder.values();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["catch"], "missing");
    assert_eq!(values[0]["error"], Value::Null);
}

#[test]
fn test_first_registered_match_wins() {
    let mut router = Router::new();
    echo(&mut router, "prefix", "/a/*");
    echo(&mut router, "exact", "/a/b");
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/a/b", None);
    assert_eq!(recorder.take()[0]["name"], "prefix");

    let mut router = Router::new();
    echo(&mut router, "exact", "/a/b");
    echo(&mut router, "prefix", "/a/*");
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/a/b", None);
    router.execute("/a/c", None);
    let values = recorder.values();
    assert_eq!(values[0]["name"], "exact");
    assert_eq!(values[1]["name"], "prefix");
}

#[test]
fn test_strict_route_does_not_match_its_bare_prefix() {
    let mut router = Router::new();
    echo(&mut router, "admin", "/admin/*");
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/admin", None);
    assert!(recorder.is_empty());
    router.execute("/admin/users/7", None);
    assert_eq!(recorder.values()[0]["route"], "/admin/");
}

#[test]
fn test_matching_ignores_case() {
    let mut router = Router::new();
    echo(&mut router, "about", "/About");
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/ABOUT", None);
    assert_eq!(recorder.values()[0]["path"], "/ABOUT");
}

#[test]
fn test_dispatch_before_subscribe_is_ignored() {
    let mut router = Router::new();
    let trail = Trail::default();
    let seen = trail.clone();
    router
        .get(RouteSpec::any(handler(move |req, _res, _next| seen.push(req.path.clone()))))
        .unwrap();

    router.execute("/early", None);
    assert!(trail.entries().is_empty());

    let (recorder, subscription) = Recorder::subscribe(&router);
    router.execute("/live", None);
    subscription.unsubscribe();
    router.execute("/late", None);

    assert_eq!(trail.entries(), vec!["/live"]);
    assert!(recorder.is_empty());
}

#[test]
fn test_resubscribe_reactivates_and_replaces_sink() {
    let mut router = Router::new();
    echo(&mut router, "home", "/");

    let (first, subscription) = Recorder::subscribe(&router);
    router.execute("/", None);
    subscription.unsubscribe();
    router.execute("/", None);

    let (second, _sub) = Recorder::subscribe(&router);
    router.execute("/", None);

    assert_eq!(first.values().len(), 1);
    assert_eq!(second.values().len(), 1);
}

#[test]
fn test_initial_url_dispatched_on_subscribe() {
    let mut router = Router::with_config(RouterConfig::default().with_initial("/welcome"));
    echo(&mut router, "welcome", "/welcome");

    let (recorder, _sub) = Recorder::subscribe(&router);
    let values = recorder.values();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["name"], "welcome");
}

#[test]
fn test_unroutable_url_is_logged_not_thrown() {
    let tracing = TestTracing::init();
    let mut router = Router::new();
    echo(&mut router, "home", "/");
    catch_echo(&mut router, "api", "/api/*");
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/nowhere", None);

    assert!(recorder.is_empty());
    assert!(tracing
        .logs
        .contents()
        .contains("No route or catch fallbacks found"));
}

#[test]
fn test_non_string_url_is_rejected() {
    let mut router = Router::new();
    echo(&mut router, "home", "/");
    let (recorder, _sub) = Recorder::subscribe(&router);

    let err = router.execute_value(&json!(42), None).unwrap_err();
    assert!(matches!(err, RouterError::InvalidUrl { ref found } if found == "number"));
    assert!(recorder.is_empty());

    router.execute_value(&json!("/"), None).unwrap();
    assert_eq!(recorder.values().len(), 1);
}

#[test]
fn test_non_string_url_is_rejected_even_when_unsubscribed() {
    let router = Router::new();
    assert!(router.execute_value(&Value::Null, None).is_err());
}

#[test]
fn test_state_is_copied_into_request() {
    let mut router = Router::new();
    router
        .get(RouteSpec::new(
            "/",
            handler(|req, res, _next| res.send(Value::Object(req.state.clone()))),
        ))
        .unwrap();
    let (recorder, _sub) = Recorder::subscribe(&router);

    let mut state = State::new();
    state.insert("scroll".to_string(), json!(120));
    router.execute("/", Some(&state));
    state.insert("scroll".to_string(), json!(0));
    router.execute("/", None);

    let values = recorder.values();
    assert_eq!(values[0], json!({ "scroll": 120 }));
    assert_eq!(values[1], json!({}));
}

#[test]
fn test_handler_error_resolves_catch_with_payload() {
    let mut router = Router::new();
    router
        .get(RouteSpec::new(
            "/orders/:id",
            handler(|req, res, _next| {
                res.error(json!({ "code": 404, "order": req.param("id") }));
            }),
        ))
        .unwrap();
    catch_echo(&mut router, "orders", "/orders/:ref");
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/orders/9", None);

    let values = recorder.values();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0]["catch"], "orders");
    assert_eq!(values[0]["params"], json!({ "ref": "9" }));
    assert_eq!(values[0]["error"], json!({ "code": 404, "order": "9" }));
}

#[test]
fn test_handler_error_without_catch_is_swallowed() {
    let mut router = Router::new();
    router
        .get(RouteSpec::new("/", handler(|_req, res, _next| res.error(json!("boom")))))
        .unwrap();
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/", None);
    assert!(recorder.is_empty());
}

#[test]
fn test_error_raised_in_catch_handler_is_dropped() {
    let tracing = TestTracing::init();
    let calls = Trail::default();
    let seen = calls.clone();
    let mut router = Router::new();
    router
        .catch(RouteSpec::any(catch_handler(move |_req, res, err| {
            seen.push("fallback");
            res.error(json!({ "wrapped": err.cloned() }));
        })))
        .unwrap();
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/missing", None);

    assert_eq!(calls.entries(), vec!["fallback"]);
    assert!(recorder.is_empty());
    assert!(tracing
        .logs
        .contents()
        .contains("Error raised inside catch route"));
}

#[test]
fn test_handler_error_escalated_by_catch_runs_catch_once() {
    let calls = Trail::default();
    let seen = calls.clone();
    let mut router = Router::new();
    router
        .get(RouteSpec::new("/", handler(|_req, res, _next| res.error(json!("boom")))))
        .unwrap();
    router
        .catch(RouteSpec::any(catch_handler(move |_req, res, err| {
            seen.push(format!("fallback {}", err.cloned().unwrap_or_default()));
            res.send(json!("recovered"));
            res.error(json!("again"));
        })))
        .unwrap();
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/", None);

    assert_eq!(calls.entries(), vec![r#"fallback "boom""#]);
    assert_eq!(recorder.values(), vec![json!("recovered")]);
}

#[test]
fn test_catch_route_middleware_is_not_run() {
    let trail = Trail::default();
    let seen = trail.clone();
    let mut router = Router::new();
    router
        .catch(
            RouteSpec::any(catch_handler(|_req, res, _err| res.send(json!("fallback"))))
                .with_middleware(middleware(move |_req, _res, next| {
                    seen.push("catch middleware");
                    next.run();
                })),
        )
        .unwrap();
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/missing", None);
    assert_eq!(recorder.values(), vec![json!("fallback")]);
    assert!(trail.entries().is_empty());
}

#[test]
fn test_catch_routes_also_first_match_wins() {
    let mut router = Router::new();
    catch_echo(&mut router, "docs", "/docs/*");
    catch_echo(&mut router, "all", "*");
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/docs/intro", None);
    router.execute("/blog", None);

    let values = recorder.values();
    assert_eq!(values[0]["catch"], "docs");
    assert_eq!(values[1]["catch"], "all");
}

#[test]
fn test_nested_dispatch_completes_before_outer_resumes() {
    let trail = Trail::default();
    let router_slot: Rc<OnceCell<Weak<Router>>> = Rc::new(OnceCell::new());
    let mut router = Router::new();

    let slot = Rc::clone(&router_slot);
    let redirect = trail.clone();
    let old = trail.clone();
    router
        .get(
            RouteSpec::new(
                "/old",
                handler(move |_req, res, _next| {
                    old.push("old:handler");
                    res.send(json!("old"));
                }),
            )
            .with_middleware(middleware(move |_req, _res, next| {
                redirect.push("redirect:before");
                if let Some(router) = slot.get().and_then(Weak::upgrade) {
                    router.execute("/new", None);
                }
                redirect.push("redirect:after");
                next.run();
            })),
        )
        .unwrap();

    let inner = trail.clone();
    router
        .get(RouteSpec::new(
            "/new",
            handler(move |_req, res, _next| {
                inner.push("new:handler");
                res.send(json!("new"));
            }),
        ))
        .unwrap();

    let router = Rc::new(router);
    router_slot.set(Rc::downgrade(&router)).unwrap();
    let (recorder, _sub) = Recorder::subscribe(&router);

    router.execute("/old", None);

    assert_eq!(
        trail.entries(),
        vec!["redirect:before", "new:handler", "redirect:after", "old:handler"]
    );
    assert_eq!(recorder.values(), vec![json!("new"), json!("old")]);
}
