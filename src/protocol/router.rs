use log::debug;

use crate::{error::ServiceError, pagination::paginate};

use super::{
    Channel, DownstreamClient, DownstreamError, DownstreamRequest, Request, Response,
    SearchRequest, TransportError,
};

/// Dispatches validated requests to their handlers.
pub struct Router<C: Channel> {
    downstream: DownstreamClient<C>,
}

impl<C: Channel> Router<C> {
    pub fn new(downstream: DownstreamClient<C>) -> Self {
        Self { downstream }
    }

    pub fn route(&mut self, request: Request) -> Result<Response, ServiceError> {
        match request {
            Request::Search(search) => self.search(search),
        }
    }

    fn search(&mut self, request: SearchRequest) -> Result<Response, ServiceError> {
        let SearchRequest {
            table,
            filters,
            page,
            page_size,
        } = request;

        debug!("selecting from '{table}' with {} filter(s)", filters.len());
        let reply = self
            .downstream
            .call(&DownstreamRequest::select(table, filters))
            .map_err(|e| match e {
                TransportError::Timeout => ServiceError::Downstream(DownstreamError::Timeout),
                e => ServiceError::Transport(e),
            })?;

        let rows = reply.into_rows()?;
        debug!("downstream returned {} row(s)", rows.len());

        let (data, pagination) = paginate(rows, page, page_size);
        Ok(Response::Success { data, pagination })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};

    use super::*;
    use crate::{pagination::Pagination, protocol::transport::testing::ScriptedChannel};

    fn search(page: i64, page_size: i64) -> Request {
        Request::Search(SearchRequest {
            table: "users".to_string(),
            filters: Map::new(),
            page,
            page_size,
        })
    }

    fn rows(count: usize) -> Vec<Value> {
        (0..count).map(|id| json!({"id": id})).collect()
    }

    fn router_with(reply: Value) -> Router<ScriptedChannel> {
        Router::new(DownstreamClient::new(ScriptedChannel::new().then_json(reply)))
    }

    #[test]
    fn search_paginates_rows() {
        let mut router = router_with(json!({"status": "success", "data": {"rows": rows(25)}}));

        let response = router.route(search(3, 10)).unwrap();

        assert_eq!(
            response,
            Response::Success {
                data: rows(25)[20..].to_vec(),
                pagination: Pagination {
                    page: 3,
                    page_size: 10,
                    total_records: 25,
                    total_pages: 3
                }
            }
        );
    }

    #[test]
    fn search_forwards_table_and_filters() {
        let channel = ScriptedChannel::new()
            .then_json(json!({"status": "success", "data": {"rows": []}}));
        let sent = channel.sent();
        let mut router = Router::new(DownstreamClient::new(channel));

        let mut filters = Map::new();
        filters.insert("age".to_string(), json!(30));
        router
            .route(Request::Search(SearchRequest {
                table: "people".to_string(),
                filters,
                page: 1,
                page_size: 10,
            }))
            .unwrap();

        assert_eq!(
            serde_json::from_slice::<Value>(&sent.borrow()[0]).unwrap(),
            json!({"action": "select", "table": "people", "filters": {"age": 30}})
        );
    }

    #[test]
    fn search_with_failed_downstream() {
        let mut router = router_with(json!({"status": "error"}));

        let err = router.route(search(1, 10)).unwrap_err();

        assert_eq!(err.to_string(), "Database service error");
    }

    #[test]
    fn search_with_downstream_timeout() {
        let channel = ScriptedChannel::new().then_err(TransportError::Timeout);
        let mut router = Router::new(DownstreamClient::new(channel));

        let err = router.route(search(1, 10)).unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Downstream(DownstreamError::Timeout)
        ));
        assert_eq!(err.to_string(), "Database service timed out");
    }

    #[test]
    fn repeated_search_is_identical() {
        let reply = json!({"status": "success", "data": {"rows": rows(7)}});
        let channel = ScriptedChannel::new()
            .then_json(reply.clone())
            .then_json(reply);
        let mut router = Router::new(DownstreamClient::new(channel));

        let first = router.route(search(2, 3)).unwrap();
        let second = router.route(search(2, 3)).unwrap();

        assert_eq!(first, second);
    }
}
