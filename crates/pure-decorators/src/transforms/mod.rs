pub mod pure_decorators;
