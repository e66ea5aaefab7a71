use std::io::Cursor;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::feed::{Feed, FeedImage, FeedItem};

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:media="http://search.yahoo.com/mrss/">
<channel>
  <title>Lau de Bugs' Blog</title>
  <link>https://www.laudebugs.me/api/rss</link>
  <description>Life and Software Development Blog</description>
  ...
  <item>
    <title><![CDATA[Learning Rust]]></title>
    <link>https://www.laudebugs.me/dev/learning-rust</link>
    <guid isPermaLink="false">https://www.laudebugs.me/dev/learning-rust</guid>
    <pubDate>Mon, 1 Jan 2024 00:00:00 +0000</pubDate>
    <description><![CDATA[Notes from the first month]]></description>
    <content:encoded><![CDATA[<p>...</p>]]></content:encoded>
    <enclosure url="https://raw.githubusercontent.com/.../learning-rust.png" length="0" type="image/png"/>
    <media:content url="https://raw.githubusercontent.com/.../learning-rust.png" medium="image" type="image/png">
      <media:thumbnail url="https://raw.githubusercontent.com/.../learning-rust.png"/>
      <media:description>Ferris on a desk</media:description>
      <media:credit>Photo by someone</media:credit>
    </media:content>
  </item>
</channel>
</rss>
*/

const RSS_DOCS: &str = "https://validator.w3.org/feed/docs/rss2.html";
const MEDIA_NS: &str = "http://search.yahoo.com/mrss/";

pub struct RssChannel<'a> {
    pub feed: &'a Feed,
}

impl<'a> RssChannel<'a> {
    pub fn render(&self) -> quick_xml::Result<Vec<u8>> {
        let feed = self.feed;
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        let decl = Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None));
        writer.write_event(decl)?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        rss.push_attribute(("xmlns:content", "http://purl.org/rss/1.0/modules/content/"));
        rss.push_attribute(("xmlns:atom", "http://www.w3.org/2005/Atom"));
        rss.push_attribute(("xmlns:media", MEDIA_NS));
        writer.write_event(Event::Start(rss))?;

        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        push_text(&mut writer, "title", &feed.title)?;
        push_text(&mut writer, "link", &feed.link)?;
        push_text(&mut writer, "description", &feed.description)?;
        push_text(&mut writer, "lastBuildDate", &feed.updated.to_rfc2822())?;
        push_text(&mut writer, "docs", RSS_DOCS)?;
        push_text(&mut writer, "generator", &feed.generator)?;
        push_text(&mut writer, "language", &feed.language)?;

        if !feed.image.is_empty() {
            writer.write_event(Event::Start(BytesStart::new("image")))?;
            push_text(&mut writer, "title", &feed.title)?;
            push_text(&mut writer, "url", &feed.image)?;
            push_text(&mut writer, "link", &feed.link)?;
            writer.write_event(Event::End(BytesEnd::new("image")))?;
        }

        push_text(&mut writer, "copyright", &feed.copyright)?;
        for category in feed.categories.iter() {
            push_text(&mut writer, "category", category)?;
        }

        // <atom:link href="https://www.laudebugs.me/api/rss" rel="self" type="application/rss+xml"/>
        let mut self_link = BytesStart::new("atom:link");
        self_link.push_attribute(("href", feed.feed_links.rss.as_str()));
        self_link.push_attribute(("rel", "self"));
        self_link.push_attribute(("type", "application/rss+xml"));
        writer.write_event(Event::Empty(self_link))?;

        for item in feed.items.iter() {
            render_item(&mut writer, item)?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn render_item(writer: &mut Writer<Cursor<Vec<u8>>>, item: &FeedItem) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("item")))?;

    push_cdata(writer, "title", &item.title)?;
    push_text(writer, "link", &item.link)?;

    let mut guid_elem = BytesStart::new("guid");
    guid_elem.push_attribute(("isPermaLink", "false"));
    writer.write_event(Event::Start(guid_elem))?;
    writer.write_event(Event::Text(BytesText::new(item.id.as_str())))?;
    writer.write_event(Event::End(BytesEnd::new("guid")))?;

    push_text(writer, "pubDate", &item.date.to_rfc2822())?;
    push_cdata(writer, "description", &item.description)?;
    if let Some(ref content) = item.content {
        push_cdata(writer, "content:encoded", content)?;
    }

    // RSS has room for a single author
    if let Some(author) = item.author.first() {
        push_text(writer, "author", &format!("{} ({})", author.email, author.name))?;
    }

    for category in item.categories.iter() {
        push_text(writer, "category", category)?;
    }

    if let Some(ref image) = item.image {
        let mut enclosure = BytesStart::new("enclosure");
        enclosure.push_attribute(("url", image.url.as_str()));
        enclosure.push_attribute(("length", "0"));
        enclosure.push_attribute(("type", image_mime_type(&image.url)));
        writer.write_event(Event::Empty(enclosure))?;
        push_media(writer, image)?;
    }

    writer.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

// Media RSS holds the image details an enclosure has no room for
fn push_media(writer: &mut Writer<Cursor<Vec<u8>>>, image: &FeedImage) -> quick_xml::Result<()> {
    let width = image.width.map(|w| w.to_string());
    let height = image.height.map(|h| h.to_string());

    let mut content = BytesStart::new("media:content");
    content.push_attribute(("url", image.url.as_str()));
    content.push_attribute(("medium", "image"));
    content.push_attribute(("type", image_mime_type(&image.url)));
    if let Some(ref width) = width {
        content.push_attribute(("width", width.as_str()));
    }
    if let Some(ref height) = height {
        content.push_attribute(("height", height.as_str()));
    }
    writer.write_event(Event::Start(content))?;

    if !image.thumbnail.is_empty() {
        let mut thumbnail = BytesStart::new("media:thumbnail");
        thumbnail.push_attribute(("url", image.thumbnail.as_str()));
        writer.write_event(Event::Empty(thumbnail))?;
    }
    if let Some(ref description) = image.description {
        push_text(writer, "media:description", description)?;
    }
    if let Some(ref credit) = image.credit {
        push_text(writer, "media:credit", credit)?;
    }

    writer.write_event(Event::End(BytesEnd::new("media:content")))?;
    Ok(())
}

pub fn image_mime_type(url: &str) -> &'static str {
    let ext = url.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "image/*",
    }
}

pub fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

pub fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    push_cdata_with_attrs(writer, tag, &[], text)
}

pub fn push_cdata_with_attrs(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, attrs: &[(&str, &str)], text: &str) -> quick_xml::Result<()> {
    let mut start = BytesStart::new(tag);
    for attr in attrs {
        start.push_attribute(*attr);
    }
    writer.write_event(Event::Start(start))?;
    if text.contains("]]>") {
        let new_text = text.replace("]]>", "]] >");
        writer.write_event(Event::CData(BytesCData::new(&new_text)))?;
    } else {
        writer.write_event(Event::CData(BytesCData::new(text)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
