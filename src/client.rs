//! HTTP client for the merchant endpoint.
//!
//! Provides both async and blocking client variants behind feature flags.
//! Each client also implements the matching repository trait, which is how
//! the dashboard talks to it.

use crate::models::MerchantId;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Collection path, relative to the base URL.
const MERCHANT_PATH: &str = "/merchant/";

/// Normalizes a configured base URL (no trailing slash).
fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_owned()
}

/// URL of a single merchant.
fn merchant_url(base_url: &str, id: MerchantId) -> String {
    format!("{base_url}{MERCHANT_PATH}{id}/")
}

/// Generates a merchant client (async or blocking) with builder, methods, and tests.
macro_rules! define_client {
    (
        client_name: $client:ident,
        builder_name: $builder:ident,
        http_type: $http_type:ty,
        response_type: $resp_type:ty,
        client_doc: $client_doc:expr,
        builder_doc: $builder_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
        $(send_bound: $send_bound:tt,)?
    ) => {
        #[doc = $builder_doc]
        #[derive(Debug)]
        pub struct $builder {
            /// Base URL override.
            base_url: Option<String>,
        }

        impl $builder {
            /// Overrides the base URL (e.g. from configuration or a mock server).
            #[inline]
            #[must_use]
            pub fn base_url<T: Into<String>>(mut self, url: T) -> Self {
                self.base_url = Some(url.into());
                self
            }

            /// Builds the client.
            ///
            /// # Errors
            ///
            /// Returns [`MerchantError::Http`] if the HTTP client fails to build.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub fn build(self) -> Result<$client> {
                let base_url = normalize_base_url(
                    self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
                );
                tracing::debug!(base_url = %base_url, "building client");
                let http = <$http_type>::builder().build()?;

                Ok($client { http, base_url })
            }
        }

        #[doc = $client_doc]
        #[derive(Debug)]
        pub struct $client {
            /// Underlying HTTP client.
            http: $http_type,
            /// API base URL, without trailing slash.
            base_url: String,
        }

        impl $client {
            /// Creates a new builder for configuring the client.
            #[inline]
            #[must_use]
            pub const fn builder() -> $builder {
                $builder { base_url: None }
            }

            /// Returns the base URL requests are sent to.
            #[inline]
            #[must_use]
            pub fn base_url(&self) -> &str {
                &self.base_url
            }

            /// Lists all merchants via `GET /merchant/`.
            ///
            /// Accepts both a bare JSON array and an object wrapping the
            /// array under `results`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the body matches neither shape.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn list_merchants(&self) -> Result<Vec<Merchant>> {
                let url = format!("{}{MERCHANT_PATH}", self.base_url);
                let page: MerchantPage = self.get_json(&url) $( .$await_ext )? ?;
                let merchants = page.into_merchants();
                tracing::debug!(count = merchants.len(), "listed merchants");
                Ok(merchants)
            }

            /// Fetches one merchant via `GET /merchant/{id}/`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails, the server returns a
            /// non-success status, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn fetch_merchant(&self, id: MerchantId) -> Result<Merchant> {
                self.get_json(&merchant_url(&self.base_url, id)) $( .$await_ext )?
            }

            /// Creates a merchant via `POST /merchant/`. The response body is
            /// ignored.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails or the server returns
            /// a non-success status.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn create_merchant(&self, draft: &NewMerchant) -> Result<()> {
                let url = format!("{}{MERCHANT_PATH}", self.base_url);
                self.send_json(Method::POST, &url, draft) $( .$await_ext )?
            }

            /// Replaces a merchant via `PUT /merchant/{id}/`. The response
            /// body is ignored.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails or the server returns
            /// a non-success status.
            #[inline]
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn update_merchant(
                &self,
                id: MerchantId,
                record: &Merchant,
            ) -> Result<()> {
                let url = merchant_url(&self.base_url, id);
                self.send_json(Method::PUT, &url, record) $( .$await_ext )?
            }

            /// Deletes a merchant via `DELETE /merchant/{id}/`.
            ///
            /// # Errors
            ///
            /// Returns an error if the HTTP request fails or the server returns
            /// a non-success status.
            #[inline]
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn delete_merchant(&self, id: MerchantId) -> Result<()> {
                let url = merchant_url(&self.base_url, id);
                tracing::trace!(url = %url, "sending DELETE request");
                let response: $resp_type = self.http.delete(&url).send() $( .$await_ext )? ?;
                let _body = Self::read_success(response) $( .$await_ext )? ?;
                Ok(())
            }

            /// Sends a GET request and deserializes the response body.
            $($async_kw)? fn get_json<Resp: serde::de::DeserializeOwned>(
                &self,
                url: &str,
            ) -> Result<Resp> {
                tracing::trace!(url = %url, "sending GET request");
                let response: $resp_type = self.http.get(url).send() $( .$await_ext )? ?;
                let body = Self::read_success(response) $( .$await_ext )? ?;
                tracing::trace!(body_len = body.len(), "parsing response body");
                serde_json::from_str(&body).map_err(MerchantError::from)
            }

            /// Sends a JSON body and checks the status, discarding the
            /// response body.
            $($async_kw)? fn send_json<Req: serde::Serialize $(+ $send_bound)?>(
                &self,
                method: Method,
                url: &str,
                body: &Req,
            ) -> Result<()> {
                tracing::trace!(url = %url, method = %method, "sending JSON request");
                let response: $resp_type = self
                    .http
                    .request(method, url)
                    .header(CONTENT_TYPE, "application/json")
                    .json(body)
                    .send()
                    $( .$await_ext )?
                    ?;
                let _body = Self::read_success(response) $( .$await_ext )? ?;
                Ok(())
            }

            /// Returns the body of a success response, or an API error
            /// carrying the status and body otherwise.
            $($async_kw)? fn read_success(response: $resp_type) -> Result<String> {
                let status = response.status();
                tracing::debug!(status = %status, "received response");
                if status.is_success() {
                    Ok(response.text() $( .$await_ext )? ?)
                } else {
                    let message = response
                        .text()
                        $( .$await_ext )?
                        .unwrap_or_else(|_| "unknown error".to_owned());
                    tracing::debug!(status = status.as_u16(), message = %message, "API error");
                    Err(MerchantError::Api {
                        status: status.as_u16(),
                        message,
                    })
                }
            }
        }

    };
}

#[cfg(feature = "async")]
mod async_client {
    //! Async HTTP client for the merchant endpoint.

    use core::future::Future;

    use reqwest::Method;
    use reqwest::header::CONTENT_TYPE;

    use super::{DEFAULT_BASE_URL, MERCHANT_PATH, merchant_url, normalize_base_url};
    use crate::error::{MerchantError, Result};
    use crate::models::{Merchant, MerchantId, MerchantPage, NewMerchant};
    use crate::repository::Repository;

    define_client! {
        client_name: MerchantClient,
        builder_name: MerchantClientBuilder,
        http_type: reqwest::Client,
        response_type: reqwest::Response,
        client_doc: "Async client for the merchant endpoint.\n\nUse [`MerchantClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`MerchantClient`].",
        async_kw: async,
        await_kw: await,
        send_bound: Sync,
    }

    impl Repository for MerchantClient {
        #[inline]
        fn list_all(&self) -> impl Future<Output = Result<Vec<Merchant>>> + Send {
            self.list_merchants()
        }

        #[inline]
        fn fetch(&self, id: MerchantId) -> impl Future<Output = Result<Merchant>> + Send {
            self.fetch_merchant(id)
        }

        #[inline]
        fn create(&self, draft: &NewMerchant) -> impl Future<Output = Result<()>> + Send {
            self.create_merchant(draft)
        }

        #[inline]
        fn update(
            &self,
            id: MerchantId,
            record: &Merchant,
        ) -> impl Future<Output = Result<()>> + Send {
            self.update_merchant(id, record)
        }

        #[inline]
        fn remove(&self, id: MerchantId) -> impl Future<Output = Result<()>> + Send {
            self.delete_merchant(id)
        }
    }
}

#[cfg(feature = "blocking")]
mod blocking_client {
    //! Blocking (synchronous) HTTP client for the merchant endpoint.

    use reqwest::Method;
    use reqwest::header::CONTENT_TYPE;

    use super::{DEFAULT_BASE_URL, MERCHANT_PATH, merchant_url, normalize_base_url};
    use crate::error::{MerchantError, Result};
    use crate::models::{Merchant, MerchantId, MerchantPage, NewMerchant};
    use crate::repository::BlockingRepository;

    define_client! {
        client_name: MerchantBlockingClient,
        builder_name: MerchantBlockingClientBuilder,
        http_type: reqwest::blocking::Client,
        response_type: reqwest::blocking::Response,
        client_doc: "Blocking (synchronous) client for the merchant endpoint.\n\nUse [`MerchantBlockingClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`MerchantBlockingClient`].",
    }

    impl BlockingRepository for MerchantBlockingClient {
        #[inline]
        fn list_all(&self) -> Result<Vec<Merchant>> {
            self.list_merchants()
        }

        #[inline]
        fn fetch(&self, id: MerchantId) -> Result<Merchant> {
            self.fetch_merchant(id)
        }

        #[inline]
        fn create(&self, draft: &NewMerchant) -> Result<()> {
            self.create_merchant(draft)
        }

        #[inline]
        fn update(&self, id: MerchantId, record: &Merchant) -> Result<()> {
            self.update_merchant(id, record)
        }

        #[inline]
        fn remove(&self, id: MerchantId) -> Result<()> {
            self.delete_merchant(id)
        }
    }
}

#[cfg(feature = "async")]
pub use async_client::{MerchantClient, MerchantClientBuilder};
#[cfg(feature = "blocking")]
pub use blocking_client::{MerchantBlockingClient, MerchantBlockingClientBuilder};
