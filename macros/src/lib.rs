//! Handler wrapper that lets one axum handler serve both HTML pages and JSON.
//!
//! A wrapped handler returns `Result<impl Serialize, Err>`. The renderer's
//! context is extracted before the handler's own extractors and decides how
//! the value (or the error) is written out.

mod renderer;

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::handler::Handler;
use axum::response::{IntoResponse, Response};
use std::future::Future;
use std::pin::Pin;

pub use renderer::{CustomResponseMetadata, HtmlRenderer, IntoSerializedResponse};

#[derive(Clone)]
pub struct OutputWrapperFactory<M> {
    pub renderer: M,
}

impl<M: Clone> OutputWrapperFactory<M> {
    pub fn handler<T>(&self, template_name: &'static str, handler: T) -> AutoOutputWrapper<T, M> {
        AutoOutputWrapper {
            handler,
            template: template_name,
            renderer: self.renderer.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AutoOutputWrapper<T, M> {
    handler: T,
    template: &'static str,
    renderer: M,
}

#[rustfmt::skip]
macro_rules! all_the_tuples {
    ($name:ident) => {
        $name!([], T1);
        $name!([T1], T2);
        $name!([T1, T2], T3);
        $name!([T1, T2, T3], T4);
        $name!([T1, T2, T3, T4], T5);
        $name!([T1, T2, T3, T4, T5], T6);
        $name!([T1, T2, T3, T4, T5, T6], T7);
        $name!([T1, T2, T3, T4, T5, T6, T7], T8);
    };
}

macro_rules! impl_handler {
    (
        [$($ty:ident),*], $last:ident
    ) => {
        #[allow(non_snake_case, unused_mut)]
        impl<F, Fut, S, Res, M, $($ty,)* $last, Hal> Handler<(M, $($ty,)* $last,), S> for AutoOutputWrapper<F, Hal>
        where
            F: FnOnce($($ty,)* $last,) -> Fut + Clone + Send + Sync + 'static,
            Fut: Future<Output = Result<Res, <Hal as HtmlRenderer<S>>::Err>> + Send,
            S: Send + Sync + 'static,
            Res: IntoSerializedResponse<S, Hal> + Send + 'static,
            $( $ty: FromRequestParts<S> + Send, )*
            $last: FromRequest<S, M> + Send,
            Hal: HtmlRenderer<S> + Clone + Send + Sync + 'static,
        {
            type Future = Pin<Box<dyn Future<Output = Response> + Send>>;

            fn call(self, req: Request, state: S) -> Self::Future {
                let (mut parts, body) = req.into_parts();

                Box::pin(async move {
                    let context = match <Hal::Context as FromRequestParts<S>>::from_request_parts(&mut parts, &state).await {
                        Ok(context) => context,
                        Err(rejection) => return rejection.into_response(),
                    };

                    $(
                        let $ty = match $ty::from_request_parts(&mut parts, &state).await {
                            Ok(value) => value,
                            Err(rejection) => return rejection.into_response(),
                        };
                    )*

                    let req = Request::from_parts(parts, body);

                    let $last = match $last::from_request(req, &state).await {
                        Ok(value) => value,
                        Err(rejection) => return rejection.into_response(),
                    };

                    match (self.handler)($($ty,)* $last,).await {
                        Ok(data) => data.into_serialized_response(context, self.renderer, self.template),
                        Err(e) => self.renderer.render_error(e, context),
                    }
                })
            }
        }
    };
}

all_the_tuples!(impl_handler);
