//! GROQ queries issued against the dataset.
//!
//! Drafts (`drafts.*` IDs) are excluded everywhere; only published documents
//! reach the site.

/// Projection shared by the post queries.
macro_rules! post_projection {
    () => {
        r#"{
  _id,
  _updatedAt,
  title,
  "slug": slug.current,
  excerpt,
  publishedAt,
  metaTitle,
  metaDescription,
  "mainImage": mainImage{ "url": asset->url, alt },
  "author": author->name,
  "categories": categories[]->{ title, "slug": slug.current },
  "body": pt::text(body)
}"#
    };
}

/// All published posts, newest first.
pub const POSTS: &str = concat!(
    r#"*[_type == "post" && !(_id in path("drafts.**"))] | order(publishedAt desc) "#,
    post_projection!()
);

/// One post by slug (`$slug`).
pub const POST_BY_SLUG: &str = concat!(
    r#"*[_type == "post" && slug.current == $slug && !(_id in path("drafts.**"))][0] "#,
    post_projection!()
);

/// All categories, by title.
pub const CATEGORIES: &str = r#"*[_type == "category" && !(_id in path("drafts.**"))] | order(title asc) {
  _id,
  _updatedAt,
  title,
  "slug": slug.current,
  description
}"#;

/// All fishing technique guides, by title.
pub const TECHNIQUES: &str = r#"*[_type == "fishingTechnique" && !(_id in path("drafts.**"))] | order(title asc) {
  _id,
  _updatedAt,
  title,
  "slug": slug.current,
  description
}"#;

/// Minimal projection of every document of type `$type`.
pub const DOCUMENTS: &str = r#"*[_type == $type && !(_id in path("drafts.**"))] | order(_createdAt asc) {
  _id,
  _type,
  title,
  "slug": slug.current
}"#;
