mod employee;
mod helpers;
mod login;
mod logout;
mod manager;
mod session;
