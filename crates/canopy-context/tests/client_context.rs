//! End-to-end behavior of the client registry over a scope tree: publish,
//! retrieve, shadow, unmount and call through the retrieved handle.

use canopy_context::{Scope, get_client, set_client};
use canopy_core::{Client, LocalTransport, Router, procedures};
use rstest::{fixture, rstest};

procedures! {
    /// Procedure set served by the echo fixture.
    pub struct EchoProcedures {
        queries: ["echo", "version"],
        mutations: ["append"],
    }
}

procedures! {
    /// A set the echo fixture does not serve.
    pub struct UnrelatedProcedures {
        queries: ["other"],
    }
}

fn echo_client(version: &'static str) -> Client<EchoProcedures> {
    let router = Router::builder()
        .query("echo", |(), input: String| Ok(input))
        .query("version", move |(), _input: ()| Ok(version.to_owned()))
        .mutation("append", |(), input: String| Ok(format!("{input}!")))
        .build()
        .arced();
    Client::new(LocalTransport::new(router, || ()))
}

#[fixture]
fn app() -> Scope {
    Scope::root()
}

#[rstest]
fn descendant_receives_the_exact_published_handle(app: Scope) {
    let client = echo_client("1");
    set_client(&app, client.clone());

    let page = app.child();
    let widget = page.child();
    let retrieved = get_client::<EchoProcedures>(&widget).expect("ancestor published a client");
    assert!(retrieved.ptr_eq(&client));
}

#[rstest]
fn retrieved_handle_serves_calls(app: Scope) {
    set_client(&app, echo_client("1"));

    let page = app.child();
    let client = get_client::<EchoProcedures>(&page).expect("published");
    let reply: String = client.query("echo", "Hello!".to_owned()).expect("echo query");
    assert_eq!(reply, "Hello!");
}

#[rstest]
fn no_provider_means_absent_not_a_panic(app: Scope) {
    // `app` itself never publishes; a subtree outside any provider sees nothing.
    assert!(get_client::<EchoProcedures>(&app).is_none());
    assert!(get_client::<EchoProcedures>(&app.child().child()).is_none());
}

#[rstest]
fn nested_provider_shadows_only_its_own_subtree(app: Scope) {
    let outer = echo_client("1");
    let inner = echo_client("2");
    set_client(&app, outer.clone());

    let section = app.child();
    set_client(&section, inner.clone());

    let inside = section.child();
    let retrieved = get_client::<EchoProcedures>(&inside).expect("nested provider");
    assert!(retrieved.ptr_eq(&inner));
    let version: String = retrieved.query("version", ()).expect("version query");
    assert_eq!(version, "2");

    // A sibling outside the nested subtree still observes the outer handle.
    let sibling = app.child();
    let retrieved = get_client::<EchoProcedures>(&sibling).expect("outer provider");
    assert!(retrieved.ptr_eq(&outer));
}

#[rstest]
fn unmounting_the_provider_removes_visibility(app: Scope) {
    let provider = app.child();
    set_client(&provider, echo_client("1"));
    assert!(get_client::<EchoProcedures>(&provider.child()).is_some());

    provider.dispose();

    // A fresh subtree mounted at the same position observes absence.
    let remounted = app.child();
    assert!(get_client::<EchoProcedures>(&remounted).is_none());
    // So do stale descendants of the unmounted provider.
    assert!(get_client::<EchoProcedures>(&provider.child()).is_none());
}

#[rstest]
fn narrowing_to_a_different_procedure_set_reports_absence(app: Scope) {
    set_client(&app, echo_client("1"));

    let page = app.child();
    assert!(get_client::<UnrelatedProcedures>(&page).is_none());
    assert!(get_client::<EchoProcedures>(&page).is_some());
}

#[rstest]
fn separate_trees_do_not_leak_into_each_other(app: Scope) {
    set_client(&app, echo_client("1"));

    let other_tree = Scope::root();
    assert!(get_client::<EchoProcedures>(&other_tree.child()).is_none());
}
