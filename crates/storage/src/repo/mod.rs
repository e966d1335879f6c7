mod comments;
mod pages;
