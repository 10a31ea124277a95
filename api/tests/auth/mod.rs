mod guards_test;
