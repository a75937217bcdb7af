use canopy_context::{Scope, get_client, set_client};
use canopy_core::{Client, LocalTransport, Router, procedures};
use tracing_subscriber::EnvFilter;

procedures! {
    /// Procedures the demo application talks to.
    pub struct AppProcedures {
        queries: ["echo"],
    }
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let router = Router::builder()
        .query("echo", |(), input: String| Ok(format!("canopy says: {input}")))
        .build()
        .arced();

    // Application bootstrap: construct the client once, publish it at the root.
    let app = Scope::root();
    let client: Client<AppProcedures> = Client::new(LocalTransport::new(router, || ()));
    set_client(&app, client);

    // Any descendant retrieves the handle without prop threading.
    let page = app.child();
    let client = get_client::<AppProcedures>(&page).expect("client published by an ancestor");
    let reply: String = client.query("echo", "Hello!".to_owned()).expect("echo query");
    println!("{reply}");
}
