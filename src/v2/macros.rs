/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

// Fetches a single entity, resolves its expansions and attaches the client
macro_rules! obj_from_url {
    ( $c:expr, $url:expr, $options:expr, $rt:ty, $r:ident ) => {{
        let resp = $c.get::<$rt>($url, &$options.to_params()).await?;
        let mut obj = resp
            .payload
            .ok_or($crate::v2::errors::SmugMugError::ResponseMissing())?
            .$r;
        $crate::v2::expansion::Expandable::expand(&mut obj, &resp.expansions)?;
        obj.client = Some($c.clone());
        Ok(obj)
    }};
}

// Fetches one page of a collection, resolving expansions for every entity on it
macro_rules! page_from_url {
    ( $c:expr, $url:expr, $options:expr, $request:expr, $rt:ty, $r:ident ) => {{
        let mut params = $options.to_params();
        params.extend($request.params());
        let resp = $c.get::<$rt>($url, &params).await?;
        let page = resp
            .payload
            .ok_or($crate::v2::errors::SmugMugError::ResponseMissing())?;
        let mut items = page.$r;
        $crate::v2::expansion::expand_all(&mut items, &resp.expansions)?;
        for item in items.iter_mut() {
            item.client = Some($c.clone());
        }
        let pages = page
            .pages
            .unwrap_or_else(|| $crate::v2::pagination::Pages::complete(items.len() as u64));
        Ok((items, pages))
    }};
}

pub(crate) use {obj_from_url, page_from_url};
