#![allow(dead_code)]

use html::{Document, NodeId, parse_document};

/// A product grid: `n` cards with shared and distinguishing classes, a heading, and a
/// trailing element of a different tag carrying the same class.
pub fn product_grid(n: usize) -> Document {
    let mut markup = String::from("<html><head><title>shop</title></head><body>");
    markup.push_str("<header><h1>Shop</h1></header><main><section class=\"grid wide\">");
    for i in 0..n {
        let extra = if i % 2 == 0 { " even" } else { " odd" };
        markup.push_str(&format!(
            "<div class=\"product{extra}\" data-id=\"{i}\"><h2 class=title>Item {i}</h2>\
             <span class=price>{i}.00</span><a class=buy href=\"/buy/{i}\">Buy</a></div>"
        ));
    }
    markup.push_str("<p class=product>promo</p></section></main></body></html>");
    parse_document(&markup)
}

/// Mixed rows: the first cell is a `td` in some rows and a `th` in others.
pub fn mixed_table() -> Document {
    parse_document(
        "<html><body><table id=stats>\
         <tr><th class=\"cell key\">a</th><td class=val>1</td></tr>\
         <tr><td class=\"cell key alt\">b</td><td class=val>2</td></tr>\
         <tr><td class=\"cell\">c</td><td class=val>3</td></tr>\
         </table></body></html>",
    )
}

pub fn find_all(doc: &Document, selector: &str) -> Vec<NodeId> {
    css::query_all(doc, None, selector).expect("fixture selector parses")
}

pub fn find(doc: &Document, selector: &str) -> NodeId {
    find_all(doc, selector)[0]
}
