//! GROQ query definitions

/// The twelve newest posts with a slug, newest first
pub const POSTS_QUERY: &str = r#"*[_type == "post" && defined(slug.current)]|order(publishedAt desc)[0...12]{
  _id,
  title,
  slug,
  body,
  mainImage,
  publishedAt,
  "categories": coalesce(
    categories[]->{
      _id,
      slug,
      title
    },
    []
  ),
  author->{
    name,
    image
  }
}"#;

/// Every routable post slug, used for static route enumeration
pub const POSTS_SLUGS_QUERY: &str = r#"*[_type == "post" && defined(slug.current)]{
  "slug": slug.current
}"#;

/// A single post by `$slug`
pub const POST_QUERY: &str = r#"*[_type == "post" && slug.current == $slug][0]{
  _id,
  title,
  body,
  mainImage,
  publishedAt,
  "categories": coalesce(
    categories[]->{
      _id,
      slug,
      title
    },
    []
  ),
  author->{
    name,
    image
  },
  relatedPosts[]{
    _key,
    ...@->{_id, title, slug}
  },
}"#;

/// A builder page by `$slug`, with block references expanded
pub const PAGE_QUERY: &str = r#"*[_type == "page" && slug.current == $slug][0]{
  ...,
  content[]{
    ...,
    _type == "hero" => {
      ...,
      title,
      text,
      image
    },
    _type == "splitImage" => {
      ...,
      title,
      image,
      orientation
    },
    _type == "faqs" => {
      ...,
      faqs[]->
    },
    _type == "features" => {
      ...,
      features[]{
        _key,
        title,
        text
      }
    }
  }
}"#;

/// The site settings singleton and its referenced home page
pub const HOME_PAGE_QUERY: &str = r#"*[_id == "siteSettings"][0]{
    homePage->{
      ...,
      content[]{
        ...,
        _type == "faqs" => {
          ...,
          faqs[]->
        }
      }
    }
  }"#;
