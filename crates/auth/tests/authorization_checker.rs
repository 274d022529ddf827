use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;
use warden_auth::{
    AuthorizationError, AuthorizerRegistry, DefaultAuthorizationChecker, DefaultAuthorizer,
    SharedAuthorizer, authorizer_fn, is_authorized, same_instance,
};
use warden_core::{
    AnonymousClient, Client, HttpMethod, InMemorySessionStore, InMemoryWebContext, NamedClient,
    UserProfile,
};

fn checker() -> DefaultAuthorizationChecker {
    DefaultAuthorizationChecker
}

fn builtin(d: DefaultAuthorizer) -> SharedAuthorizer {
    d.instance()
}

fn indirect() -> Vec<Arc<dyn Client>> {
    vec![Arc::new(NamedClient::indirect("FormClient"))]
}

fn anonymous() -> Vec<Arc<dyn Client>> {
    vec![Arc::new(AnonymousClient)]
}

fn alice() -> Vec<UserProfile> {
    vec![UserProfile::new("alice").unwrap()]
}

fn assert_same_list(actual: &[SharedAuthorizer], expected: &[SharedAuthorizer]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!(same_instance(a, e), "{a:?} vs {e:?}");
    }
}

#[test]
fn no_clients_and_blank_expression_require_authentication() {
    let list = checker()
        .compute_authorizers(Some("   "), Some(&AuthorizerRegistry::new()), &[])
        .unwrap();
    assert_same_list(&list, &[builtin(DefaultAuthorizer::IsAuthenticated)]);
}

#[test]
fn indirect_client_adds_csrf_check_first() {
    let list = checker()
        .compute_authorizers(None, Some(&AuthorizerRegistry::new()), &indirect())
        .unwrap();
    assert_same_list(
        &list,
        &[
            builtin(DefaultAuthorizer::CsrfCheck),
            builtin(DefaultAuthorizer::IsAuthenticated),
        ],
    );
}

#[test]
fn anonymous_client_yields_empty_list_and_allows() {
    let list = checker()
        .compute_authorizers(Some(""), Some(&AuthorizerRegistry::new()), &anonymous())
        .unwrap();
    assert!(list.is_empty());

    let mut ctx = InMemoryWebContext::default();
    let mut store = InMemorySessionStore::new();
    let allowed = is_authorized(
        &mut ctx,
        &mut store,
        &[UserProfile::anonymous()],
        None,
        Some(&AuthorizerRegistry::new()),
        &anonymous(),
    )
    .unwrap();
    assert!(allowed);
}

#[test]
fn added_custom_authorizer_follows_defaults() {
    let custom = authorizer_fn("custom", |_, _, _| Ok(true));
    let registry: AuthorizerRegistry = [("custom", Arc::clone(&custom))].into_iter().collect();

    let list = checker()
        .compute_authorizers(Some("+custom"), Some(&registry), &indirect())
        .unwrap();
    assert_same_list(
        &list,
        &[
            builtin(DefaultAuthorizer::CsrfCheck),
            builtin(DefaultAuthorizer::IsAuthenticated),
            custom,
        ],
    );
}

#[test]
fn removing_csrf_check_leaves_authentication() {
    let list = checker()
        .compute_authorizers(Some("-csrfCheck"), Some(&AuthorizerRegistry::new()), &indirect())
        .unwrap();
    assert_same_list(&list, &[builtin(DefaultAuthorizer::IsAuthenticated)]);
}

#[test]
fn none_expression_allows_without_checks() {
    let registry = AuthorizerRegistry::new();
    let list = checker()
        .compute_authorizers(Some("none"), Some(&registry), &indirect())
        .unwrap();
    assert!(list.is_empty());

    let mut ctx = InMemoryWebContext::new(HttpMethod::Post);
    let mut store = InMemorySessionStore::new();
    let allowed = is_authorized(
        &mut ctx,
        &mut store,
        &[UserProfile::anonymous()],
        Some("none"),
        Some(&registry),
        &indirect(),
    )
    .unwrap();
    assert!(allowed);
}

#[test]
fn unknown_name_is_a_configuration_error() {
    let err = checker()
        .compute_authorizers(Some("unknown"), Some(&AuthorizerRegistry::new()), &[])
        .unwrap_err();
    assert!(matches!(err, AuthorizationError::UnknownAuthorizer { ref name } if name == "unknown"));
    assert!(err.to_string().contains("'unknown'"));
}

#[test]
fn builtin_names_ignore_case_and_whitespace() {
    let list = checker()
        .compute_authorizers(
            Some(" IsAuthenticated , isRemembered "),
            Some(&AuthorizerRegistry::new()),
            &indirect(),
        )
        .unwrap();
    assert_same_list(
        &list,
        &[
            builtin(DefaultAuthorizer::IsAuthenticated),
            builtin(DefaultAuthorizer::IsRemembered),
        ],
    );
}

#[test]
fn empty_profiles_are_a_precondition_error() {
    for expression in [None, Some("none"), Some("isAuthenticated"), Some("+x-y"), Some("unknown")] {
        let mut ctx = InMemoryWebContext::default();
        let mut store = InMemorySessionStore::new();
        let err = is_authorized(
            &mut ctx,
            &mut store,
            &[],
            expression,
            Some(&AuthorizerRegistry::new()),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, AuthorizationError::NoProfiles), "{expression:?}");
    }
}

#[test]
fn deny_skips_remaining_authorizers() {
    warden_observability::init();

    let calls = Arc::new(AtomicUsize::new(0));
    let counting = |allow: bool| {
        let calls = Arc::clone(&calls);
        authorizer_fn("counting", move |_, _, _| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(allow)
        })
    };
    let registry: AuthorizerRegistry = [
        ("first", counting(true)),
        ("deny", counting(false)),
        ("after", counting(true)),
    ]
    .into_iter()
    .collect();

    let mut ctx = InMemoryWebContext::default();
    let mut store = InMemorySessionStore::new();
    let allowed = is_authorized(
        &mut ctx,
        &mut store,
        &alice(),
        Some("first,deny,after"),
        Some(&registry),
        &[],
    )
    .unwrap();

    assert!(!allowed);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn csrf_default_denies_unprotected_post_from_indirect_client() {
    let mut ctx = InMemoryWebContext::new(HttpMethod::Post);
    let mut store = InMemorySessionStore::new();
    let registry = AuthorizerRegistry::new();

    let allowed =
        is_authorized(&mut ctx, &mut store, &alice(), None, Some(&registry), &indirect()).unwrap();
    assert!(!allowed);

    let allowed = is_authorized(
        &mut ctx,
        &mut store,
        &alice(),
        Some("-csrfCheck"),
        Some(&registry),
        &indirect(),
    )
    .unwrap();
    assert!(allowed);
}

#[test]
fn explicit_list_of_registry_keys_round_trips() {
    let registry: AuthorizerRegistry = [
        ("Admin", authorizer_fn("admin", |_, _, _| Ok(true))),
        ("reports", authorizer_fn("reports", |_, _, _| Ok(true))),
        ("isAnonymous", authorizer_fn("shadow", |_, _, _| Ok(true))),
    ]
    .into_iter()
    .collect();

    let expression = registry.names().collect::<Vec<_>>().join(",");
    let list = checker()
        .compute_authorizers(Some(&expression), Some(&registry), &[])
        .unwrap();
    let expected: Vec<SharedAuthorizer> = registry.iter().map(|(_, a)| Arc::clone(a)).collect();
    assert_same_list(&list, &expected);
}

fn shuffle_case(name: &str, mask: &[bool]) -> String {
    name.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| {
            if *upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn resolution_ignores_case_and_surrounding_whitespace(
        builtin_index in 0usize..5,
        mask in prop::collection::vec(any::<bool>(), 1..8),
        left in "[ \t]{0,3}",
        right in "[ \t]{0,3}",
    ) {
        let d = DefaultAuthorizer::ALL[builtin_index];
        let variant = format!("{left}{}{right}", shuffle_case(d.name(), &mask));
        let resolved = AuthorizerRegistry::new().resolve(&variant).unwrap();
        prop_assert!(same_instance(&resolved, &d.instance()));
    }

    #[test]
    fn evaluation_is_conjunction(decisions in prop::collection::vec(any::<bool>(), 0..8)) {
        let authorizers: Vec<SharedAuthorizer> = decisions
            .iter()
            .map(|&allow| authorizer_fn("fixed", move |_, _, _| Ok(allow)))
            .collect();

        let mut ctx = InMemoryWebContext::default();
        let mut store = InMemorySessionStore::new();
        let allowed = checker()
            .evaluate(&mut ctx, &mut store, &alice(), &authorizers)
            .unwrap();
        prop_assert_eq!(allowed, decisions.iter().all(|d| *d));
    }

    #[test]
    fn none_entries_never_change_the_list(
        positions in prop::collection::vec(0usize..3, 0..4),
        indirect_client in any::<bool>(),
    ) {
        let clients = if indirect_client { indirect() } else { Vec::new() };
        let registry = AuthorizerRegistry::new();
        let mut names = vec!["isAuthenticated".to_string(), "isRemembered".to_string()];
        for p in positions {
            let p = p.min(names.len());
            names.insert(p, " NoNe ".to_string());
        }

        let plain = checker()
            .compute_authorizers(Some("isAuthenticated,isRemembered"), Some(&registry), &clients)
            .unwrap();
        let with_none = checker()
            .compute_authorizers(Some(&names.join(",")), Some(&registry), &clients)
            .unwrap();
        prop_assert_eq!(plain.len(), with_none.len());
        for (a, b) in plain.iter().zip(&with_none) {
            prop_assert!(same_instance(a, b));
        }
    }

    #[test]
    fn blank_expression_equals_client_defaults(
        blank in "[ \t\n]{0,4}",
        indirect_client in any::<bool>(),
        anonymous_client in any::<bool>(),
    ) {
        let mut clients: Vec<Arc<dyn Client>> = Vec::new();
        if indirect_client {
            clients.push(Arc::new(NamedClient::indirect("FormClient")));
        }
        if anonymous_client {
            clients.push(Arc::new(AnonymousClient));
        }
        let registry = AuthorizerRegistry::new();

        let from_blank = checker()
            .compute_authorizers(Some(&blank), Some(&registry), &clients)
            .unwrap();
        let defaults = checker().default_authorizers(&clients, Some(&registry));
        prop_assert_eq!(from_blank.len(), defaults.len());
        for (a, b) in from_blank.iter().zip(&defaults) {
            prop_assert!(same_instance(a, b));
        }
    }
}
