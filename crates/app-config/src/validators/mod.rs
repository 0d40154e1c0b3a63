pub mod site;
pub mod url;
