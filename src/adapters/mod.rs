pub mod sales_dataset;
