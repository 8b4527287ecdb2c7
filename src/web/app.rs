use std::sync::Arc;

use async_graphql::{
    Context, EmptyMutation, EmptySubscription, Error, Schema, http::GraphiQLSource,
};
use async_graphql_poem::GraphQL;
use poem::{Route, Server, get, handler, listener::TcpListener, web::Html};
use tracing::info;

use crate::{
    routing::route,
    structures::{
        Graph, LatLng, RouteQuery, RoutingDefaultConfig,
        plan::{Plan, PlanObjective},
    },
};

pub type PlanSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub struct QueryRoot;

#[async_graphql::Object]
impl QueryRoot {
    async fn ping(&self) -> &str {
        "pong"
    }

    /// `start` and `deadline` are `HH:MM` clock times.
    #[allow(clippy::too_many_arguments)]
    async fn plan(
        &self,
        ctx: &Context<'_>,
        from_lat: f64,
        from_lng: f64,
        to_lat: f64,
        to_lng: f64,
        objective: PlanObjective,
        start: Option<String>,
        deadline: Option<String>,
    ) -> Result<Plan, Error> {
        let graph = ctx.data::<Arc<Graph>>()?.clone();
        let defaults = ctx.data::<RoutingDefaultConfig>()?;

        let query = RouteQuery::parse(
            LatLng::new(from_lat, from_lng),
            LatLng::new(to_lat, to_lng),
            objective.into(),
            start.as_deref(),
            deadline.as_deref(),
            defaults.start_minutes().map_err(Error::new)?,
        )
        .map_err(Error::new)?;

        let itinerary = tokio::task::spawn_blocking(move || route(graph.as_ref(), &query))
            .await
            .map_err(|e| Error::new(format!("Routing task failed: {e}")))??;

        Ok(Plan::from(&itinerary))
    }
}

#[handler]
async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

pub fn schema(graph: Arc<Graph>, defaults: RoutingDefaultConfig) -> PlanSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(graph)
        .data(defaults)
        .finish()
}

pub fn app(graph: Arc<Graph>, defaults: RoutingDefaultConfig) -> Route {
    Route::new()
        .at("/graphql", GraphQL::new(schema(graph, defaults)))
        .at("/graphiql", get(graphiql))
}

pub async fn server(
    graph: Arc<Graph>,
    defaults: RoutingDefaultConfig,
    bind: &str,
) -> std::io::Result<()> {
    info!("Serving on {bind}");
    Server::new(TcpListener::bind(bind))
        .run(app(graph, defaults))
        .await
}
