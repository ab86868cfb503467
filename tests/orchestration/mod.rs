mod order_creation;
