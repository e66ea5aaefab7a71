use std::io::Cursor;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::config::Author;
use crate::feed::{Feed, FeedItem};
use crate::view::rss_renderer::{image_mime_type, push_cdata_with_attrs, push_text};

pub struct AtomFeed<'a> {
    pub feed: &'a Feed,
}

impl<'a> AtomFeed<'a> {
    pub fn render(&self) -> quick_xml::Result<Vec<u8>> {
        let feed = self.feed;
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("feed");
        root.push_attribute(("xmlns", "http://www.w3.org/2005/Atom"));
        writer.write_event(Event::Start(root))?;

        push_text(&mut writer, "id", &feed.id)?;
        push_text(&mut writer, "title", &feed.title)?;
        push_text(&mut writer, "updated", &atom_date(&feed.updated))?;
        push_text(&mut writer, "generator", &feed.generator)?;
        push_person(&mut writer, "author", &feed.author)?;
        push_link(&mut writer, "alternate", &feed.link)?;
        push_link(&mut writer, "self", &feed.feed_links.atom)?;
        push_text(&mut writer, "subtitle", &feed.description)?;
        if !feed.image.is_empty() {
            push_text(&mut writer, "logo", &feed.image)?;
        }
        if !feed.favicon.is_empty() {
            push_text(&mut writer, "icon", &feed.favicon)?;
        }
        push_text(&mut writer, "rights", &feed.copyright)?;
        for category in feed.categories.iter() {
            push_category(&mut writer, category)?;
        }

        for item in feed.items.iter() {
            render_entry(&mut writer, item)?;
        }

        writer.write_event(Event::End(BytesEnd::new("feed")))?;
        Ok(writer.into_inner().into_inner())
    }
}

fn render_entry(writer: &mut Writer<Cursor<Vec<u8>>>, item: &FeedItem) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("entry")))?;

    push_html(writer, "title", &item.title)?;
    push_text(writer, "id", &item.id)?;

    let mut link = BytesStart::new("link");
    link.push_attribute(("href", item.link.as_str()));
    writer.write_event(Event::Empty(link))?;

    push_text(writer, "updated", &atom_date(&item.date))?;
    push_html(writer, "summary", &item.description)?;
    if let Some(ref content) = item.content {
        push_html(writer, "content", content)?;
    }

    for author in item.author.iter() {
        push_person(writer, "author", author)?;
    }
    for contributor in item.contributor.iter() {
        push_person(writer, "contributor", contributor)?;
    }
    for category in item.categories.iter() {
        push_category(writer, category)?;
    }

    if let Some(ref image) = item.image {
        let mut enclosure = BytesStart::new("link");
        enclosure.push_attribute(("rel", "enclosure"));
        enclosure.push_attribute(("type", image_mime_type(&image.url)));
        enclosure.push_attribute(("href", image.url.as_str()));
        if let Some(caption) = image.caption() {
            enclosure.push_attribute(("title", caption.as_str()));
        }
        writer.write_event(Event::Empty(enclosure))?;
    }

    writer.write_event(Event::End(BytesEnd::new("entry")))?;
    Ok(())
}

fn atom_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn push_html(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, html: &str) -> quick_xml::Result<()> {
    push_cdata_with_attrs(writer, tag, &[("type", "html")], html)
}

fn push_person(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, person: &Author) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    push_text(writer, "name", &person.name)?;
    if !person.email.is_empty() {
        push_text(writer, "email", &person.email)?;
    }
    if !person.link.is_empty() {
        push_text(writer, "uri", &person.link)?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_link(writer: &mut Writer<Cursor<Vec<u8>>>, rel: &str, href: &str) -> quick_xml::Result<()> {
    let mut link = BytesStart::new("link");
    link.push_attribute(("rel", rel));
    link.push_attribute(("href", href));
    writer.write_event(Event::Empty(link))?;
    Ok(())
}

fn push_category(writer: &mut Writer<Cursor<Vec<u8>>>, term: &str) -> quick_xml::Result<()> {
    let mut category = BytesStart::new("category");
    category.push_attribute(("term", term));
    writer.write_event(Event::Empty(category))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use crate::test_data::create_feed;

    use super::*;

    #[test]
    fn render_atom() {
        let feed = create_feed();
        let xml = AtomFeed { feed: &feed }.render().unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    #[test]
    fn test_push_html() {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        push_html(&mut writer, "summary", "<b>bold</b>").unwrap();
        let xml = writer.into_inner().into_inner();
        assert_eq!(str::from_utf8(&xml).unwrap(), r#"<summary type="html"><![CDATA[<b>bold</b>]]></summary>"#);
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><feed xmlns="http://www.w3.org/2005/Atom"><id>https://example.com/</id><title>my feed</title><updated>2024-01-02T05:06:07.000Z</updated><generator>blogfeed</generator><author><name>Jane Doe</name><email>jane@example.com</email><uri>https://example.com/</uri></author><link rel="alternate" href="https://example.com/api/rss"/><link rel="self" href="https://example.com/api/rss/atom"/><subtitle>My blog feed</subtitle><logo>https://example.com/logo.png</logo><icon>https://example.com/favicon.ico</icon><rights>All rights reserved</rights><category term="rust"/><category term="web"/><entry><title type="html"><![CDATA[Hello & welcome]]></title><id>https://example.com/dev/hello</id><link href="https://example.com/dev/hello"/><updated>2024-01-02T05:06:07.000Z</updated><summary type="html"><![CDATA[First post]]></summary><content type="html"><![CDATA[<p>Hi</p>]]></content><author><name>Jane Doe</name><email>jane@example.com</email><uri>https://example.com/</uri></author><contributor><name>Jane Doe</name><email>jane@example.com</email><uri>https://example.com/</uri></contributor><category term="rust"/><link rel="enclosure" type="image/png" href="https://example.com/assets/hello.png" title="A wave (Photo by Ana &amp; Co)"/></entry><entry><title type="html"><![CDATA[Second]]></title><id>https://example.com/fragments#second</id><link href="https://example.com/fragments#second"/><updated>2024-01-01T00:00:00.000Z</updated><summary type="html"><![CDATA[Second post]]></summary><author><name>Jane Doe</name><email>jane@example.com</email><uri>https://example.com/</uri></author><contributor><name>Jane Doe</name><email>jane@example.com</email><uri>https://example.com/</uri></contributor></entry></feed>"##;
}
